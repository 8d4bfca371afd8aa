//! Loading of user-supplied input files: templates and parameter sets.

use crate::errors::RunError;
use impactt_core::{InputTemplate, Params};
use std::path::Path;

/// Read an input-file template from disk.
pub fn load_template(path: &Path) -> Result<InputTemplate, RunError> {
    let text = std::fs::read_to_string(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(InputTemplate::new(text))
}

/// Load a YAML mapping of `name: scalar` into [`Params`].
///
/// Nested mappings and sequences are rejected; a setting is always a single
/// scalar. Group prefixes (`distgen:sigma_x`) are plain key text at this
/// level.
pub fn load_params(path: &Path) -> Result<Params, RunError> {
    let text = std::fs::read_to_string(path).map_err(|source| RunError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| RunError::BadParams {
        path: path.to_path_buf(),
        source,
    })
}
