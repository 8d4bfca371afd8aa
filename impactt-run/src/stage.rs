//! Staging of shared data files into the run directory.
//!
//! The simulator expects its field maps and lookup tables (`rfdata1`,
//! `1T1.T7`, ...) to sit next to `ImpactT.in`, so each run copies them out of
//! the site data directory. Copies overwrite on conflict and there is no
//! rollback on partial failure.

use crate::errors::StageError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Create `run_dir` (and parents) if it does not exist yet.
pub fn ensure_run_dir(run_dir: &Path) -> Result<(), StageError> {
    fs::create_dir_all(run_dir).map_err(|source| StageError::CreateRunDir {
        path: run_dir.to_path_buf(),
        source,
    })
}

/// Copy data files into `run_dir`, returning the staged paths.
///
/// With `files` given, copies exactly those names out of `data_dir`; without,
/// copies every regular file found there. Subdirectories are not descended.
pub fn populate_data_files(
    data_dir: &Path,
    run_dir: &Path,
    files: Option<&[String]>,
) -> Result<Vec<PathBuf>, StageError> {
    if !data_dir.is_dir() {
        return Err(StageError::DataDirUnreachable(data_dir.to_path_buf()));
    }

    let sources: Vec<PathBuf> = match files {
        Some(names) => names.iter().map(|name| data_dir.join(name)).collect(),
        None => {
            let entries = fs::read_dir(data_dir)
                .map_err(|_| StageError::DataDirUnreachable(data_dir.to_path_buf()))?;
            let mut found = Vec::new();
            for entry in entries {
                let entry = entry
                    .map_err(|_| StageError::DataDirUnreachable(data_dir.to_path_buf()))?;
                let path = entry.path();
                if path.is_file() {
                    found.push(path);
                }
            }
            // stable staging order, mostly for logs and tests
            found.sort();
            found
        }
    };

    let mut staged = Vec::with_capacity(sources.len());
    for src in sources {
        if !src.is_file() {
            return Err(StageError::MissingDataFile(src));
        }
        let Some(name) = src.file_name() else {
            return Err(StageError::MissingDataFile(src));
        };
        let dest = run_dir.join(name);
        fs::copy(&src, &dest).map_err(|source| StageError::Copy {
            src: src.clone(),
            dest: dest.clone(),
            source,
        })?;
        staged.push(dest);
    }
    info!(count = staged.len(), run_dir = %run_dir.display(), "staged data files");
    Ok(staged)
}
