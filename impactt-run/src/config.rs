//! Site configuration: where the simulator binary lives and where its shared
//! data files are kept.
//!
//! Both values come from a `config.yaml` next to the invocation (the original
//! workflow keeps one per machine) and may reference environment variables as
//! `$VAR` or `${VAR}`.

use crate::errors::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File name the loader looks for.
pub const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(rename = "IMPACT_EXE_PATH")]
    impact_exe_path: Option<String>,
    #[serde(rename = "DATA_DIR")]
    data_dir: Option<String>,
}

/// Resolved site paths.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub impact_exe_path: PathBuf,
    pub data_dir: PathBuf,
}

impl SiteConfig {
    /// Load `config.yaml` from the current working directory.
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(ConfigError::CurrentDir)?;
        Self::load_from(&cwd)
    }

    /// Load `config.yaml` from `dir`.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if !path.is_file() {
            return Err(ConfigError::NotFound(path));
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let raw: RawConfig =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })?;

        let exe = required(raw.impact_exe_path, "IMPACT_EXE_PATH")?;
        let data = required(raw.data_dir, "DATA_DIR")?;
        Ok(Self {
            impact_exe_path: expand_env("IMPACT_EXE_PATH", &exe)?.into(),
            data_dir: expand_env("DATA_DIR", &data)?.into(),
        })
    }
}

fn required(value: Option<String>, key: &'static str) -> Result<String, ConfigError> {
    value
        .filter(|s| !s.trim().is_empty())
        .ok_or(ConfigError::MissingKey(key))
}

/// Expand `$VAR` and `${VAR}` references against the process environment.
/// An unset variable is an error; a `$` that starts no name passes through.
fn expand_env(key: &'static str, value: &str) -> Result<String, ConfigError> {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        let braced = chars.peek() == Some(&'{');
        if braced {
            chars.next();
        }
        let mut name = String::new();
        while let Some(&c2) = chars.peek() {
            let in_name = if braced {
                c2 != '}'
            } else {
                c2 == '_' || c2.is_ascii_alphanumeric()
            };
            if !in_name {
                break;
            }
            name.push(c2);
            chars.next();
        }
        if braced && chars.peek() == Some(&'}') {
            chars.next();
        }
        if name.is_empty() {
            out.push('$');
            if braced {
                out.push('{');
            }
            continue;
        }
        match std::env::var(&name) {
            Ok(v) => out.push_str(&v),
            Err(_) => return Err(ConfigError::UnsetEnvVar { key, name }),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_both_reference_forms() {
        std::env::set_var("IMPACTT_TEST_ROOT", "/opt/impact");
        let got = expand_env("DATA_DIR", "${IMPACTT_TEST_ROOT}/data/$IMPACTT_TEST_ROOT").unwrap();
        assert_eq!(got, "/opt/impact/data//opt/impact");
    }

    #[test]
    fn unset_variable_is_an_error() {
        let err = expand_env("DATA_DIR", "$IMPACTT_TEST_SURELY_UNSET/data").unwrap_err();
        match err {
            ConfigError::UnsetEnvVar { key, name } => {
                assert_eq!(key, "DATA_DIR");
                assert_eq!(name, "IMPACTT_TEST_SURELY_UNSET");
            }
            other => panic!("expected UnsetEnvVar, got {other:?}"),
        }
    }

    #[test]
    fn bare_dollar_passes_through() {
        assert_eq!(expand_env("DATA_DIR", "a$ b$").unwrap(), "a$ b$");
    }
}
