//! Child-process invocation of the simulator.

use crate::errors::ProcessError;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{info, warn};

/// File the child's stdout is captured into, inside the run directory.
pub const OUTPUT_FILE: &str = "output.txt";

/// Launches the simulator in a run directory and waits for it.
#[derive(Clone, Debug)]
pub struct Launcher {
    exe: PathBuf,
    num_procs: u32,
    timeout: Option<Duration>,
}

impl Launcher {
    /// Resolve `exe` and build a launcher.
    ///
    /// Resolution happens here so a bad path fails before anything is
    /// spawned: bare command names go through `PATH`, everything else must
    /// point at an existing file.
    pub fn new(
        exe: impl AsRef<Path>,
        num_procs: u32,
        timeout: Option<Duration>,
    ) -> Result<Self, ProcessError> {
        let exe = resolve_exe(exe.as_ref())?;
        Ok(Self {
            exe,
            num_procs: num_procs.max(1),
            timeout,
        })
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    pub fn num_procs(&self) -> u32 {
        self.num_procs
    }

    /// Run the simulator with `run_dir` as its working directory and wait
    /// for completion.
    ///
    /// stdout goes to [`OUTPUT_FILE`], stderr is discarded, and a configured
    /// timeout kills the child. Returns the exit code, which is zero: any
    /// non-zero or abnormal exit surfaces as [`ProcessError`].
    pub async fn invoke(&self, run_dir: &Path) -> Result<i32, ProcessError> {
        let out_path = run_dir.join(OUTPUT_FILE);
        let stdout = std::fs::File::create(&out_path).map_err(|source| ProcessError::Redirect {
            path: out_path,
            source,
        })?;

        // mpirun only when more than one rank was asked for, so plain
        // single-process runs work on hosts without MPI
        let mut cmd = if self.num_procs > 1 {
            let mut c = Command::new("mpirun");
            c.arg("-n").arg(self.num_procs.to_string()).arg(&self.exe);
            c
        } else {
            Command::new(&self.exe)
        };
        cmd.current_dir(run_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::null());

        info!(
            exe = %self.exe.display(),
            num_procs = self.num_procs,
            run_dir = %run_dir.display(),
            "launching simulator"
        );
        let mut child = cmd.spawn().map_err(|source| ProcessError::Spawn {
            exe: self.exe.clone(),
            source,
        })?;

        let waited = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, child.wait()).await {
                Ok(status) => status,
                Err(_) => {
                    warn!(seconds = limit.as_secs(), "simulator timed out, killing");
                    child.kill().await.ok();
                    return Err(ProcessError::TimedOut {
                        seconds: limit.as_secs(),
                    });
                }
            },
            None => child.wait().await,
        };
        let status = waited.map_err(|source| ProcessError::Wait {
            exe: self.exe.clone(),
            source,
        })?;

        match status.code() {
            Some(0) => Ok(0),
            Some(code) => Err(ProcessError::Exited { code }),
            None => Err(ProcessError::Signaled),
        }
    }
}

/// Resolve the configured executable path without spawning anything.
fn resolve_exe(exe: &Path) -> Result<PathBuf, ProcessError> {
    let is_bare_name = exe.components().count() == 1 && !exe.is_absolute();
    if is_bare_name {
        return which::which(exe).map_err(|_| ProcessError::NotFound(exe.to_path_buf()));
    }
    if !exe.exists() {
        return Err(ProcessError::NotFound(exe.to_path_buf()));
    }
    if !exe.is_file() {
        return Err(ProcessError::NotAFile(exe.to_path_buf()));
    }
    Ok(exe.to_path_buf())
}
