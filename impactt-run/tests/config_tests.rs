use impactt_run::{ConfigError, SiteConfig};
use std::fs;
use std::path::PathBuf;

#[test]
fn loads_and_expands_paths() {
    let dir = tempfile::tempdir().unwrap();
    std::env::set_var("IMPACTT_CFG_TEST_HOME", "/srv/impact");
    fs::write(
        dir.path().join("config.yaml"),
        "IMPACT_EXE_PATH: ${IMPACTT_CFG_TEST_HOME}/bin/ImpactTexe\n\
         DATA_DIR: $IMPACTT_CFG_TEST_HOME/data\n",
    )
    .unwrap();

    let cfg = SiteConfig::load_from(dir.path()).unwrap();
    assert_eq!(
        cfg.impact_exe_path,
        PathBuf::from("/srv/impact/bin/ImpactTexe")
    );
    assert_eq!(cfg.data_dir, PathBuf::from("/srv/impact/data"));
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    match SiteConfig::load_from(dir.path()) {
        Err(ConfigError::NotFound(path)) => {
            assert!(path.ends_with("config.yaml"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn missing_key_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yaml"), "DATA_DIR: /tmp/data\n").unwrap();
    assert!(matches!(
        SiteConfig::load_from(dir.path()),
        Err(ConfigError::MissingKey("IMPACT_EXE_PATH"))
    ));
}

#[test]
fn blank_key_counts_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        "IMPACT_EXE_PATH: /bin/true\nDATA_DIR: \"\"\n",
    )
    .unwrap();
    assert!(matches!(
        SiteConfig::load_from(dir.path()),
        Err(ConfigError::MissingKey("DATA_DIR"))
    ));
}

#[test]
fn malformed_yaml_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.yaml"), "IMPACT_EXE_PATH: [oops\n").unwrap();
    assert!(matches!(
        SiteConfig::load_from(dir.path()),
        Err(ConfigError::Parse { .. })
    ));
}

#[test]
fn unset_env_var_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("config.yaml"),
        "IMPACT_EXE_PATH: $IMPACTT_CFG_TEST_NEVER_SET/exe\nDATA_DIR: /tmp/data\n",
    )
    .unwrap();
    match SiteConfig::load_from(dir.path()) {
        Err(ConfigError::UnsetEnvVar { key, name }) => {
            assert_eq!(key, "IMPACT_EXE_PATH");
            assert_eq!(name, "IMPACTT_CFG_TEST_NEVER_SET");
        }
        other => panic!("expected UnsetEnvVar, got {other:?}"),
    }
}
