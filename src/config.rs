//! Optional TOML configuration (`trellis.toml`)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use trellis_xpdl::ExportOptions;

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "trellis.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub xpdl: XpdlConfig,
}

/// `[xpdl]` table: package header values written on export.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct XpdlConfig {
    pub package_id: Option<String>,
    pub package_name: Option<String>,
    pub vendor: Option<String>,
    /// Creation timestamp; the current UTC time when unset.
    pub created: Option<String>,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load `path`, or `trellis.toml` in the working directory if it exists,
    /// or fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Config::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Config::from_toml(&text)
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            package_id: self.xpdl.package_id.clone(),
            package_name: self.xpdl.package_name.clone(),
            vendor: Some(
                self.xpdl
                    .vendor
                    .clone()
                    .unwrap_or_else(|| format!("Trellis {}", env!("CARGO_PKG_VERSION"))),
            ),
            created: Some(
                self.xpdl
                    .created
                    .clone()
                    .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            ),
        }
    }
}
