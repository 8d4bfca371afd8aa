//! Start-distribution staging.

use crate::errors::StageError;
use std::path::{Path, PathBuf};

/// File name the simulator reads the start distribution from.
pub const DISTRIBUTION_FILE: &str = "partcl.data";

/// Source of a particle start distribution.
///
/// The simulator only ever reads `partcl.data` out of the run directory, so
/// anything that can produce that file plugs in here: a pre-generated file,
/// or the output of an external distribution generator.
pub trait DistributionSource {
    fn write_to(&self, dest: &Path) -> Result<(), StageError>;
}

/// An existing distribution file, staged by copying.
#[derive(Clone, Debug)]
pub struct ParticleFile {
    path: PathBuf,
}

impl ParticleFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DistributionSource for ParticleFile {
    fn write_to(&self, dest: &Path) -> Result<(), StageError> {
        if !self.path.is_file() {
            return Err(StageError::MissingDataFile(self.path.clone()));
        }
        std::fs::copy(&self.path, dest).map_err(|source| StageError::Copy {
            src: self.path.clone(),
            dest: dest.to_path_buf(),
            source,
        })?;
        Ok(())
    }
}
