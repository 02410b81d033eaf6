//! Error types for GraphLens.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid node id: {0:?}")]
    InvalidNodeId(String),

    #[error("Invalid value for attribute '{key}': {reason}")]
    InvalidAttribute { key: String, reason: String },

    #[error("Cannot compare values of types: {attribute} and {value}")]
    Incomparable { attribute: String, value: String },

    #[error("Unsupported operator: {0}")]
    UnknownOperator(String),

    #[error("Edge references unknown node: {0}")]
    UnknownNode(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Plugin error: {0}")]
    Plugin(String),

    #[error("Invalid value for {0}")]
    InvalidParameter(String),

    #[error("Command error: {0}")]
    Command(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether the error was caused by caller input rather than an internal fault.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::InvalidNodeId(_)
                | Self::InvalidAttribute { .. }
                | Self::Incomparable { .. }
                | Self::UnknownOperator(_)
                | Self::UnknownNode(_)
                | Self::InvalidParameter(_)
                | Self::Command(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomparable_message() {
        let err = Error::Incomparable {
            attribute: "integer".into(),
            value: "string".into(),
        };
        assert_eq!(
            err.to_string(),
            "Cannot compare values of types: integer and string"
        );
        assert!(err.is_usage());
    }

    #[test]
    fn test_io_is_not_usage() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(!err.is_usage());
    }
}
