use std::path::PathBuf;
use thiserror::Error;

use crate::template::TemplateError;

#[derive(Error, Debug)]
pub enum WhiskerError {
    // Partial errors
    #[error("PARTIAL_DIR_NOT_FOUND: partial directory '{path}' does not exist")]
    PartialDirNotFound { path: PathBuf },

    #[error("PARTIAL_READ_FAILED: failed to read partial '{path}': {reason}")]
    PartialReadFailed { path: PathBuf, reason: String },

    // Data errors
    #[error("DATA_INVALID: {0}")]
    DataInvalid(String),

    // Config errors
    #[error("CONFIG_PARSE_ERROR: {0}")]
    ConfigParseError(String),

    #[error("CONFIG_INVALID: {field}: {reason}")]
    ConfigInvalid { field: String, reason: String },

    // Template errors
    #[error("TEMPLATE_ERROR: {0}")]
    Template(#[from] TemplateError),

    // IO errors
    #[error("IO_ERROR: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<serde_json::Error> for WhiskerError {
    fn from(err: serde_json::Error) -> Self {
        WhiskerError::DataInvalid(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WhiskerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_prefix_messages() {
        let err = WhiskerError::PartialDirNotFound {
            path: PathBuf::from("missing"),
        };
        assert_eq!(
            err.to_string(),
            "PARTIAL_DIR_NOT_FOUND: partial directory 'missing' does not exist"
        );

        let err = WhiskerError::ConfigInvalid {
            field: "render.missing".to_string(),
            reason: "unknown value".to_string(),
        };
        assert!(err.to_string().starts_with("CONFIG_INVALID: render.missing"));
    }

    #[test]
    fn test_template_error_conversion() {
        let template_err = TemplateError::StrayClosingTag {
            tag: "{{/ a }}".to_string(),
            line: 1,
            column: 1,
        };
        let err = WhiskerError::from(template_err);
        assert_eq!(
            err.to_string(),
            "TEMPLATE_ERROR: Stray closing tag found: {{/ a }} at 1:1"
        );
    }

    #[test]
    fn test_json_error_is_data_invalid() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(
            WhiskerError::from(json_err),
            WhiskerError::DataInvalid(_)
        ));
    }
}
