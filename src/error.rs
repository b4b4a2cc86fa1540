//! Crate-wide error type

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A numeric field failed validation. Raised instead of silently
    /// coercing so upstream data-quality bugs surface immediately.
    #[error("invalid value for `{field}`: {value} ({reason})")]
    InvalidInput {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("config error: {0}")]
    Config(String),

    #[error("team map error: {0}")]
    TeamMap(String),
}

impl Error {
    pub fn invalid_input(
        field: &'static str,
        value: impl ToString,
        reason: &'static str,
    ) -> Self {
        Self::InvalidInput {
            field,
            value: value.to_string(),
            reason,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Self::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_names_field() {
        let err = Error::invalid_input("implied_prob", "1.4", "must be in [0, 1]");
        let msg = err.to_string();
        assert!(msg.contains("implied_prob"));
        assert!(msg.contains("1.4"));
    }
}
