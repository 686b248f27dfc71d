// report.toml loading

use std::fs;
use std::path::{Path, PathBuf};

use carex_io::InputLayout;
use carex_metrics::RulesConfig;
use serde::{Deserialize, Serialize};

use crate::exit_codes::EXIT_USAGE;
use crate::CliError;

/// `[input]`: where the snapshot lives and how it is laid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    /// Workbook, or the transactions CSV of a legacy export pair.
    pub path: Option<PathBuf>,
    /// Budget CSV; only read when `path` is a CSV.
    pub budget_path: Option<PathBuf>,
    pub layout: InputLayout,
}

/// `[output]`: where report files are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub dir: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self { dir: PathBuf::from(".") }
    }
}

/// Effective settings of one run: file values, then command-line overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub input: InputSettings,
    pub output: OutputSettings,
    pub rules: RulesConfig,
}

impl Settings {
    /// Default settings file location: `<config_dir>/carex/report.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("carex")
            .join("report.toml")
    }

    /// Load settings. An explicit path must exist; the default location is
    /// optional and falls back to built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), CliError> {
        match explicit {
            Some(path) => Ok((Self::from_file(path)?, Some(path.to_path_buf()))),
            None => {
                let path = Self::default_path();
                if path.exists() {
                    Ok((Self::from_file(&path)?, Some(path)))
                } else {
                    log::debug!("no settings at {}, using defaults", path.display());
                    Ok((Self::default(), None))
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, CliError> {
        let contents = fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("cannot read settings '{}': {e}", path.display()))
                .with_hint("pass --config with an existing report.toml")
        })?;
        Self::from_toml(&contents)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e.message)))
    }

    pub fn from_toml(contents: &str) -> Result<Self, CliError> {
        let settings: Settings = toml::from_str(contents)
            .map_err(|e| CliError::config(format!("settings parse error: {e}")))?;
        settings
            .rules
            .validate()
            .map_err(|e| CliError::config(e.to_string()))?;
        Ok(settings)
    }

    /// The configured input file, or a usage error naming both ways to set it.
    pub fn input_path(&self) -> Result<&Path, CliError> {
        self.input.path.as_deref().ok_or_else(|| CliError {
            code: EXIT_USAGE,
            message: "no input file".to_string(),
            hint: Some("pass --input <FILE> or set [input] path in report.toml".to_string()),
        })
    }
}
