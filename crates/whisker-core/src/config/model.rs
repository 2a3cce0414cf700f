use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::consts::{DEFAULT_LEFT_DELIMITER, DEFAULT_PARTIAL_EXTENSION, DEFAULT_RIGHT_DELIMITER};
use crate::error::{Result, WhiskerError};
use crate::template::{Delimiters, Options};

/// whisker.toml schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub delimiters: DelimitersConfig,
    #[serde(default)]
    pub partials: PartialsConfig,
    #[serde(default)]
    pub render: RenderConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DelimitersConfig {
    #[serde(default = "default_left")]
    pub left: String,
    #[serde(default = "default_right")]
    pub right: String,
}

impl Default for DelimitersConfig {
    fn default() -> Self {
        Self {
            left: default_left(),
            right: default_right(),
        }
    }
}

fn default_left() -> String {
    DEFAULT_LEFT_DELIMITER.to_string()
}

fn default_right() -> String {
    DEFAULT_RIGHT_DELIMITER.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialsConfig {
    /// Directory searched recursively for partial files
    #[serde(default)]
    pub dir: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Explicit partial files, named by file stem
    #[serde(default)]
    pub files: Vec<PathBuf>,
}

impl Default for PartialsConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
            files: Vec::new(),
        }
    }
}

fn default_extension() -> String {
    DEFAULT_PARTIAL_EXTENSION.to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub missing: MissingPolicy,
    #[serde(default)]
    pub escape: EscapePolicy,
}

/// What a tag whose name does not resolve renders as
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPolicy {
    /// Empty text
    #[default]
    Empty,
    /// Abort the render
    Error,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EscapePolicy {
    #[default]
    Html,
    None,
}

impl Config {
    /// Read whisker.toml
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            WhiskerError::ConfigParseError(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a configuration document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).map_err(|e| WhiskerError::ConfigParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("delimiters.left", &self.delimiters.left),
            ("delimiters.right", &self.delimiters.right),
        ] {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Err(WhiskerError::ConfigInvalid {
                    field: field.to_string(),
                    reason: "delimiter must be non-empty and contain no whitespace".to_string(),
                });
            }
        }
        if self.partials.extension.is_empty() {
            return Err(WhiskerError::ConfigInvalid {
                field: "partials.extension".to_string(),
                reason: "extension must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn delimiters(&self) -> Delimiters {
        Delimiters::new(self.delimiters.left.clone(), self.delimiters.right.clone())
    }

    /// Render options implied by the `[render]` section
    pub fn options(&self) -> Options {
        let mut options = Options::new();
        if self.render.escape == EscapePolicy::None {
            options = options.without_escape();
        }
        if self.render.missing == MissingPolicy::Error {
            options = options.with_on_missing(|| Err("MISSING_VALUE: a tag did not resolve".into()));
        }
        options
    }
}
