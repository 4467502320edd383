use crate::parsers::StyleParseError;
use thiserror::Error;

/// Errors raised while looking up, registering or resolving styles.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    #[error("Unknown style: '{0}'")]
    UnknownStyle(String),

    #[error("A style named '{0}' is already registered")]
    DuplicateStyle(String),

    #[error("Invalid color: '{0}'")]
    InvalidColor(String),

    #[error("Invalid value for '{option}': '{value}'")]
    InvalidValue { option: String, value: String },

    #[error("Invalid margins value. `margins` should be a sequence of 4 numbers, got {0}")]
    InvalidMargins(String),

    #[error("Invalid pagesize: {0}")]
    InvalidPageSize(String),

    #[error(transparent)]
    Parse(#[from] StyleParseError),
}

impl StyleError {
    /// True for the errors caused by a malformed per-element override.
    pub fn is_invalid_option(&self) -> bool {
        matches!(
            self,
            StyleError::InvalidColor(_)
                | StyleError::InvalidValue { .. }
                | StyleError::InvalidMargins(_)
        )
    }
}
