//! Error types for command processing and queries.
//!
//! Every variant is recoverable: the processor turns a [`CommandError`] into
//! a rejection outcome and the query layer turns a [`QueryError`] into an
//! error payload.

use crate::ledger::LedgerError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// A precondition did not hold.
    #[error("{0}")]
    Validation(String),

    /// Unknown user, creature or item.
    #[error("{0} not found")]
    NotFound(String),

    /// The ledger refused or failed a transfer.
    #[error("ledger call failed: {0}")]
    ExternalCall(#[from] LedgerError),

    /// The command could not be decoded.
    #[error("malformed command: {0}")]
    Malformed(String),
}

/// Result type alias for command handlers.
pub type Result<T> = std::result::Result<T, CommandError>;

impl CommandError {
    #[must_use]
    pub fn validation<S: Into<String>>(msg: S) -> Self {
        Self::Validation(msg.into())
    }

    #[must_use]
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound(resource.into())
    }

    #[must_use]
    pub fn malformed<S: Into<String>>(msg: S) -> Self {
        Self::Malformed(msg.into())
    }

    /// Short machine-readable kind, used as a metrics and log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::ExternalCall(_) => "external_call",
            Self::Malformed(_) => "malformed",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown query path '{0}'")]
    UnknownSelector(String),

    #[error("bad argument: {0}")]
    BadArgument(String),

    #[error("{0} not found")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CommandError::not_found("creature 7");
        assert_eq!(err.to_string(), "creature 7 not found");

        let err = CommandError::validation("supply cap reached");
        assert_eq!(err.to_string(), "supply cap reached");
    }

    #[test]
    fn test_from_ledger_error() {
        let err: CommandError = LedgerError::InsufficientFunds {
            account: "0xabc".to_string(),
            balance: 0,
            amount: 1,
        }
        .into();
        assert_eq!(err.kind(), "external_call");
        assert!(err.to_string().starts_with("ledger call failed"));
    }
}
