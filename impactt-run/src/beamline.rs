//! One simulator run: directory, input file, distribution, data files,
//! launch.

use crate::config::SiteConfig;
use crate::distribution::{DistributionSource, DISTRIBUTION_FILE};
use crate::errors::RunError;
use crate::invoke::Launcher;
use crate::stage;
use chrono::{DateTime, Utc};
use impactt_core::{FortTable, InputTemplate, Params};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tempfile::NamedTempFile;
use tracing::info;
use uuid::Uuid;

/// Default name of the rendered input file.
pub const INPUT_FILE: &str = "ImpactT.in";

/// Outcome of a completed run.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub run_dir: PathBuf,
    pub started_at: DateTime<Utc>,
    pub wall_time_secs: f64,
    pub exit_code: i32,
}

/// A configured simulator case.
///
/// Owns everything one invocation needs; the steps of [`Beamline::run`] are
/// also public so callers can render or stage without launching.
pub struct Beamline {
    template: InputTemplate,
    params: Params,
    launcher: Launcher,
    run_dir: PathBuf,
    data_dir: PathBuf,
    data_files: Option<Vec<String>>,
    distribution: Option<Box<dyn DistributionSource>>,
}

impl Beamline {
    pub fn new(
        config: &SiteConfig,
        template: InputTemplate,
        params: Params,
        launcher: Launcher,
        run_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template,
            params,
            launcher,
            run_dir: run_dir.into(),
            data_dir: config.data_dir.clone(),
            data_files: None,
            distribution: None,
        }
    }

    /// Restrict staging to the named files instead of the whole data dir.
    pub fn with_data_files(mut self, files: Vec<String>) -> Self {
        self.data_files = Some(files);
        self
    }

    pub fn with_distribution(mut self, source: Box<dyn DistributionSource>) -> Self {
        self.distribution = Some(source);
        self
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }

    /// Render and write the input file into the run directory.
    pub fn write_input(&self) -> Result<PathBuf, RunError> {
        write_input_file(&self.template, &self.params, &self.run_dir, INPUT_FILE)
    }

    /// Stage the start distribution, when one was configured.
    pub fn write_distribution(&self) -> Result<Option<PathBuf>, RunError> {
        let Some(source) = &self.distribution else {
            return Ok(None);
        };
        let dest = self.run_dir.join(DISTRIBUTION_FILE);
        source.write_to(&dest)?;
        Ok(Some(dest))
    }

    /// Copy the configured data files into the run directory.
    pub fn stage_data(&self) -> Result<Vec<PathBuf>, RunError> {
        Ok(stage::populate_data_files(
            &self.data_dir,
            &self.run_dir,
            self.data_files.as_deref(),
        )?)
    }

    /// Full pipeline: ensure the run directory, write the input file, stage
    /// the distribution and data files, launch the simulator, wait.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        stage::ensure_run_dir(&self.run_dir)?;
        self.write_input()?;
        self.write_distribution()?;
        self.stage_data()?;

        let started_at = Utc::now();
        let clock = Instant::now();
        let exit_code = self.launcher.invoke(&self.run_dir).await?;

        let report = RunReport {
            run_id: Uuid::new_v4(),
            run_dir: self.run_dir.clone(),
            started_at,
            wall_time_secs: clock.elapsed().as_secs_f64(),
            exit_code,
        };
        info!(run_id = %report.run_id, secs = report.wall_time_secs, "run finished");
        Ok(report)
    }

    /// Read `fort.{num}` from the run directory.
    pub fn fort(&self, num: u32) -> Result<FortTable, RunError> {
        read_fort(&self.run_dir, num)
    }

    /// Did the reference particle drift backwards (fort.26 mean Pz < 0)?
    pub fn has_backward_motion(&self) -> Result<bool, RunError> {
        let table = self.fort(26)?;
        Ok(table.column("avg_pz")?.iter().any(|v| *v < 0.0))
    }
}

/// Render `template` against the input-group settings of `params` and write
/// the result to `run_dir/file_name`, replacing any previous file atomically.
pub fn write_input_file(
    template: &InputTemplate,
    params: &Params,
    run_dir: &Path,
    file_name: &str,
) -> Result<PathBuf, RunError> {
    let rendered = template.render(&params.group(Params::INPUT_GROUP))?;
    let dest = run_dir.join(file_name);

    let write = |path: PathBuf, source: std::io::Error| RunError::WriteFile { path, source };
    let mut tmp = NamedTempFile::new_in(run_dir).map_err(|e| write(dest.clone(), e))?;
    tmp.write_all(rendered.as_bytes())
        .map_err(|e| write(dest.clone(), e))?;
    tmp.persist(&dest)
        .map_err(|e| write(dest.clone(), e.error))?;
    info!(path = %dest.display(), "wrote input file");
    Ok(dest)
}

/// Read `fort.{num}` from `run_dir` into a table.
pub fn read_fort(run_dir: &Path, num: u32) -> Result<FortTable, RunError> {
    let path = run_dir.join(format!("fort.{num}"));
    let text =
        std::fs::read_to_string(&path).map_err(|source| RunError::ReadFile { path, source })?;
    Ok(FortTable::parse(num, &text)?)
}
