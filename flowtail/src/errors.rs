//! Error types for flowtail operations.
//!
//! Each failure site has its own closed error kind. Only errors that make an
//! invocation's own result unusable surface through [`FlowtailError`]; log
//! retrieval failures are reported through the log sink and recovered from.

use serde_json::{Map, Value};
use thiserror::Error;

/// The main error type for flowtail operations.
#[derive(Debug, Error)]
pub enum FlowtailError {
    /// The invoked function reported an execution-level failure.
    #[error("{0}")]
    ExecutionFailed(#[from] ExecutionFailedError),

    /// The invocation call itself failed.
    #[error("{0}")]
    Invoke(#[from] InvokeError),

    /// The log store failed while checking for the stream.
    #[error("{0}")]
    LogStore(#[from] LogStoreError),

    /// A fixed-width pattern could not be constructed.
    #[error("{0}")]
    Pattern(#[from] PatternError),
}

/// Error raised when the invoked function signals an execution failure.
///
/// Carries the correlation id assigned to the failed execution and the
/// best-effort parsed response body.
#[derive(Debug, Clone, Error)]
#[error("function execution failed (correlation id: {correlation_id}): {}", Value::Object(.body.clone()))]
pub struct ExecutionFailedError {
    /// Correlation id of the failed execution.
    pub correlation_id: String,
    /// Best-effort parsed response body.
    pub body: Map<String, Value>,
}

impl ExecutionFailedError {
    /// Creates a new execution failure error.
    #[must_use]
    pub fn new(correlation_id: impl Into<String>, body: Map<String, Value>) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            body,
        }
    }
}

/// Errors from the invocation API transport.
#[derive(Debug, Clone, Error)]
pub enum InvokeError {
    /// The named function does not exist.
    #[error("function not found: {name}")]
    NotFound {
        /// The function name.
        name: String,
    },

    /// The platform rejected the invocation request.
    #[error("invocation rejected: {reason}")]
    Rejected {
        /// The reason for rejection.
        reason: String,
    },

    /// The invocation call failed in transit.
    #[error("invocation transport error: {reason}")]
    Transport {
        /// The underlying transport failure.
        reason: String,
    },
}

impl InvokeError {
    /// Creates a function not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates a rejected invocation error.
    #[must_use]
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    /// Creates a transport error.
    #[must_use]
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }
}

/// Errors from the log store API.
#[derive(Debug, Clone, Error)]
pub enum LogStoreError {
    /// The log group or stream does not exist (yet).
    #[error("log group or stream not found: {name}")]
    NotFound {
        /// The missing group or stream name.
        name: String,
    },

    /// Any other store-side failure.
    #[error("log store error: {reason}")]
    Api {
        /// The underlying failure.
        reason: String,
    },
}

impl LogStoreError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Creates an API error.
    #[must_use]
    pub fn api(reason: impl Into<String>) -> Self {
        Self::Api {
            reason: reason.into(),
        }
    }

    /// Returns true for the not-found kind.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors raised while parsing a nested invocation response body.
///
/// These are never fatal: the fetch degrades to an empty body and a sink
/// warning.
#[derive(Debug, Clone, Error)]
pub enum BodyParseError {
    /// The response payload has no `body` key.
    #[error("response payload did not contain a 'body' key")]
    MissingBody,

    /// The `body` value is not a JSON-encoded string.
    #[error("response body is not a JSON-encoded string")]
    NotText,

    /// The `body` string is not valid JSON.
    #[error("response body is not valid JSON: {reason}")]
    Invalid {
        /// The parse failure.
        reason: String,
    },

    /// The `body` string decodes to something other than an object.
    #[error("response body is not a JSON object")]
    NotObject,
}

/// Errors raised while constructing a fixed-width Grok pattern.
#[derive(Debug, Clone, Error)]
pub enum PatternError {
    /// The column list is empty.
    #[error("column specification is empty")]
    EmptySpec,

    /// A column has an empty name.
    #[error("column {index} has an empty name")]
    EmptyName {
        /// Zero-based position of the column.
        index: usize,
    },

    /// A column name contains characters a sub-pattern name cannot carry.
    #[error("column name '{name}' contains characters outside [A-Za-z0-9_]")]
    InvalidName {
        /// The offending column name.
        name: String,
    },

    /// A column has zero width.
    #[error("column '{name}' has zero width")]
    ZeroWidth {
        /// The offending column name.
        name: String,
    },

    /// Two columns share a name.
    #[error("duplicate column name '{name}'")]
    DuplicateName {
        /// The duplicated column name.
        name: String,
    },

    /// A generated sub-pattern failed to compile.
    #[error("generated sub-pattern for column '{name}' does not compile: {reason}")]
    Regex {
        /// The offending column name.
        name: String,
        /// The compilation failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_execution_failed_display_includes_correlation_id_and_body() {
        let mut body = Map::new();
        body.insert("status".to_string(), json!("error"));
        let err = ExecutionFailedError::new("req-123", body);

        let message = err.to_string();
        assert!(message.contains("req-123"));
        assert!(message.contains("\"status\":\"error\""));
    }

    #[test]
    fn test_invoke_error_constructors() {
        assert!(matches!(
            InvokeError::not_found("fn"),
            InvokeError::NotFound { .. }
        ));
        assert!(matches!(
            InvokeError::rejected("throttled"),
            InvokeError::Rejected { .. }
        ));
        assert!(matches!(
            InvokeError::transport("timeout"),
            InvokeError::Transport { .. }
        ));
    }

    #[test]
    fn test_log_store_error_is_not_found() {
        assert!(LogStoreError::not_found("stream").is_not_found());
        assert!(!LogStoreError::api("boom").is_not_found());
    }

    #[test]
    fn test_flowtail_error_from_sub_errors() {
        let err: FlowtailError = LogStoreError::api("boom").into();
        assert!(matches!(err, FlowtailError::LogStore(_)));

        let err: FlowtailError = InvokeError::transport("down").into();
        assert!(matches!(err, FlowtailError::Invoke(_)));

        let err: FlowtailError = PatternError::EmptySpec.into();
        assert!(matches!(err, FlowtailError::Pattern(_)));
    }

    #[test]
    fn test_pattern_error_messages() {
        let err = PatternError::ZeroWidth {
            name: "ID".to_string(),
        };
        assert!(err.to_string().contains("zero width"));

        let err = PatternError::EmptyName { index: 2 };
        assert!(err.to_string().contains("column 2"));
    }
}
