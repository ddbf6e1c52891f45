//! Error handling for the internship matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{record} is missing required field `{field}`")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} has invalid field `{field}`: {reason}")]
    InvalidField {
        record: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl MatcherError {
    pub(crate) fn missing(record: &'static str, field: &'static str) -> Self {
        MatcherError::MissingField { record, field }
    }

    pub(crate) fn invalid(record: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        MatcherError::InvalidField {
            record,
            field,
            reason: reason.into(),
        }
    }

    /// True for defects in the input records themselves, as opposed to I/O
    /// or formatting failures.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            MatcherError::MissingField { .. } | MatcherError::InvalidField { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, MatcherError>;

