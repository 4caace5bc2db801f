//! Host error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced to the caller of the host.
///
/// Every failure in the core is representable as a value of this type;
/// nothing here terminates the process. Handler-internal detail never
/// crosses the dispatch boundary — see `Dispatcher` for the sanitizing
/// conversion into [`ToolError::HandlerFailure`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ToolError {
    /// No tool is registered under the requested name.
    #[error("no such tool: {0}")]
    NotFound(String),

    /// A required argument is missing, malformed, or blank.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The handler failed unexpectedly. The message is sanitized; the
    /// original failure is logged at the dispatch boundary only.
    #[error("tool execution failed: {0}")]
    HandlerFailure(String),

    /// The caller did not advertise the capability the handler needs.
    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(String),

    /// The handler misused the sampling channel.
    #[error("protocol violation: {0}")]
    ProtocolViolation(String),

    /// The invocation observed its cancellation signal.
    #[error("invocation cancelled")]
    Cancelled,

    /// A tool with the same name is already registered.
    #[error("duplicate tool name: {0}")]
    DuplicateName(String),
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged() {
        let err = ToolError::NotFound("echo".to_string());
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"kind\":\"not_found\""));
        assert!(json.contains("echo"));
    }

    #[test]
    fn display_is_caller_safe() {
        let err = ToolError::HandlerFailure("tool 'weather' failed".to_string());
        assert_eq!(err.to_string(), "tool execution failed: tool 'weather' failed");
    }
}
