use impactt_run::{ensure_run_dir, populate_data_files, StageError};
use std::fs;
use std::path::Path;

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn stages_every_regular_file() {
    let data = tempfile::tempdir().unwrap();
    let run = tempfile::tempdir().unwrap();
    fs::write(data.path().join("rfdata1"), "1 2 3\n").unwrap();
    fs::write(data.path().join("1T1.T7"), "field map\n").unwrap();
    fs::create_dir(data.path().join("unrelated")).unwrap();
    fs::write(data.path().join("unrelated/nested"), "skip me\n").unwrap();

    let staged = populate_data_files(data.path(), run.path(), None).unwrap();
    assert_eq!(staged.len(), 2);
    assert_eq!(file_names(run.path()), vec!["1T1.T7", "rfdata1"]);
}

#[test]
fn restaging_is_idempotent_and_overwrites() {
    let data = tempfile::tempdir().unwrap();
    let run = tempfile::tempdir().unwrap();
    fs::write(data.path().join("rfdata1"), "fresh\n").unwrap();

    populate_data_files(data.path(), run.path(), None).unwrap();
    fs::write(run.path().join("rfdata1"), "stale edit\n").unwrap();
    populate_data_files(data.path(), run.path(), None).unwrap();

    assert_eq!(file_names(run.path()), vec!["rfdata1"]);
    assert_eq!(
        fs::read_to_string(run.path().join("rfdata1")).unwrap(),
        "fresh\n"
    );
}

#[test]
fn explicit_list_stages_only_those_files() {
    let data = tempfile::tempdir().unwrap();
    let run = tempfile::tempdir().unwrap();
    fs::write(data.path().join("rfdata1"), "a\n").unwrap();
    fs::write(data.path().join("rfdata2"), "b\n").unwrap();

    let files = vec!["rfdata2".to_string()];
    populate_data_files(data.path(), run.path(), Some(&files)).unwrap();
    assert_eq!(file_names(run.path()), vec!["rfdata2"]);
}

#[test]
fn missing_listed_file_is_an_error() {
    let data = tempfile::tempdir().unwrap();
    let run = tempfile::tempdir().unwrap();

    let files = vec!["rfdata9".to_string()];
    match populate_data_files(data.path(), run.path(), Some(&files)) {
        Err(StageError::MissingDataFile(path)) => assert!(path.ends_with("rfdata9")),
        other => panic!("expected MissingDataFile, got {other:?}"),
    }
}

#[test]
fn unreachable_data_dir_is_an_error() {
    let run = tempfile::tempdir().unwrap();
    assert!(matches!(
        populate_data_files(Path::new("/no/such/data/dir"), run.path(), None),
        Err(StageError::DataDirUnreachable(_))
    ));
}

#[test]
fn ensure_run_dir_creates_nested_dirs() {
    let root = tempfile::tempdir().unwrap();
    let nested = root.path().join("scan/case_007");
    ensure_run_dir(&nested).unwrap();
    assert!(nested.is_dir());
    // second call is a no-op
    ensure_run_dir(&nested).unwrap();
}
