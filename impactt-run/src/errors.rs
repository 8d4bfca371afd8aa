use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid YAML in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("missing required key: {0}")]
    MissingKey(&'static str),
    #[error("environment variable {name} (referenced by {key}) is not set")]
    UnsetEnvVar { key: &'static str, name: String },
    #[error("could not determine current directory: {0}")]
    CurrentDir(io::Error),
}

#[derive(Debug, Error)]
pub enum StageError {
    #[error("data directory unreachable: {0}")]
    DataDirUnreachable(PathBuf),
    #[error("could not create run directory {path}: {source}")]
    CreateRunDir { path: PathBuf, source: io::Error },
    #[error("missing data file: {0}")]
    MissingDataFile(PathBuf),
    #[error("copying {src} to {dest} failed: {source}")]
    Copy {
        src: PathBuf,
        dest: PathBuf,
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("executable not found: {0}")]
    NotFound(PathBuf),
    #[error("{0} is not a file")]
    NotAFile(PathBuf),
    #[error("could not redirect output to {path}: {source}")]
    Redirect { path: PathBuf, source: io::Error },
    #[error("could not spawn {exe}: {source}")]
    Spawn { exe: PathBuf, source: io::Error },
    #[error("waiting on {exe} failed: {source}")]
    Wait { exe: PathBuf, source: io::Error },
    #[error("simulator exited with status {code}")]
    Exited { code: i32 },
    #[error("simulator was terminated by a signal")]
    Signaled,
    #[error("simulator timed out after {seconds}s and was killed")]
    TimedOut { seconds: u64 },
}

/// Umbrella error for a full pipeline run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Render(#[from] impactt_core::RenderError),
    #[error(transparent)]
    Stage(#[from] StageError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Output(#[from] impactt_core::OutputError),
    #[error("could not read {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteFile { path: PathBuf, source: io::Error },
    #[error("invalid parameter file {path}: {source}")]
    BadParams {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
