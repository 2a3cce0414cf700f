//! Template error types

use std::fmt;

/// Error raised by a caller-supplied callback or lambda
pub type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Template parsing and rendering errors
#[derive(Debug)]
pub enum TemplateError {
    /// A delimiter switch tag does not contain exactly two delimiters
    Delimiter {
        /// The offending tag, e.g. `{{= a =}}`
        tag: String,
        /// 1-based line of the tag
        line: usize,
        /// 1-based column of the tag
        column: usize,
    },

    /// An opening tag has no matching closing tag before the end of the template
    MissingClosingTag {
        /// The opening tag, e.g. `{{# items }}`
        tag: String,
        /// 1-based line of the opening tag
        line: usize,
        /// 1-based column of the opening tag
        column: usize,
    },

    /// A closing tag was found that closes nothing
    StrayClosingTag {
        /// The closing tag, e.g. `{{/ items }}`
        tag: String,
        /// 1-based line of the closing tag
        line: usize,
        /// 1-based column of the closing tag
        column: usize,
    },

    /// A stringify/escape/on-missing callback or a lambda failed
    Callback(CallbackError),
}

impl TemplateError {
    /// Position of the offending tag, if the error is tied to one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            TemplateError::Delimiter { line, column, .. }
            | TemplateError::MissingClosingTag { line, column, .. }
            | TemplateError::StrayClosingTag { line, column, .. } => Some((*line, *column)),
            TemplateError::Callback(_) => None,
        }
    }
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Delimiter { tag, line, column } => {
                write!(f, "Impossible delimiter tag found: {} at {}:{}", tag, line, column)
            }
            TemplateError::MissingClosingTag { tag, line, column } => {
                write!(f, "No closing tag found: {} at {}:{}", tag, line, column)
            }
            TemplateError::StrayClosingTag { tag, line, column } => {
                write!(f, "Stray closing tag found: {} at {}:{}", tag, line, column)
            }
            TemplateError::Callback(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Callback(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<CallbackError> for TemplateError {
    fn from(err: CallbackError) -> Self {
        TemplateError::Callback(err)
    }
}
