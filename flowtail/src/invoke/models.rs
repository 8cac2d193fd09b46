//! Invocation request and response models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::BodyParseError;

/// A request to invoke a remote function.
///
/// Immutable once created; the payload must be JSON-serializable, which the
/// [`Value`] type guarantees by construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationRequest {
    function_name: String,
    payload: Value,
}

impl InvocationRequest {
    /// Creates a new invocation request.
    #[must_use]
    pub fn new(function_name: impl Into<String>, payload: Value) -> Self {
        Self {
            function_name: function_name.into(),
            payload,
        }
    }

    /// Returns the target function name.
    #[must_use]
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// Returns the request payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }
}

/// The platform's response to a single invocation.
///
/// Created once per invocation and never mutated afterwards. The
/// correlation id is assigned by the platform at invoke time and is the key
/// that delimits the execution's log lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResult {
    correlation_id: String,
    payload: Value,
    function_error: Option<String>,
}

impl InvocationResult {
    /// Creates a successful invocation result.
    #[must_use]
    pub fn new(correlation_id: impl Into<String>, payload: Value) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            payload,
            function_error: None,
        }
    }

    /// Marks the result as an execution-level failure.
    #[must_use]
    pub fn with_function_error(mut self, error: impl Into<String>) -> Self {
        self.function_error = Some(error.into());
        self
    }

    /// Returns the platform-assigned correlation id.
    #[must_use]
    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    /// Returns the raw response payload.
    #[must_use]
    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Returns the execution-level error indicator, if any.
    #[must_use]
    pub fn function_error(&self) -> Option<&str> {
        self.function_error.as_deref()
    }

    /// Whether the platform flagged an execution-level failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.function_error.is_some()
    }
}

/// Best-effort parse of the nested JSON `body` field of a response payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseBody {
    /// Parsed body fields; empty when the body could not be parsed.
    pub fields: Map<String, Value>,
    /// The log stream identifier embedded in the body, if present.
    pub log_stream_name: Option<String>,
}

impl ResponseBody {
    /// Parses the nested `body` field out of a response payload.
    ///
    /// The body arrives as a JSON-encoded string inside the payload object;
    /// it must decode to an object. The `log_stream_name` field, when
    /// present as a string, locates the execution's log stream.
    pub fn parse(payload: &Value) -> Result<Self, BodyParseError> {
        let body = payload.get("body").ok_or(BodyParseError::MissingBody)?;
        let text = body.as_str().ok_or(BodyParseError::NotText)?;
        let decoded: Value =
            serde_json::from_str(text).map_err(|err| BodyParseError::Invalid {
                reason: err.to_string(),
            })?;
        let Value::Object(fields) = decoded else {
            return Err(BodyParseError::NotObject);
        };

        let log_stream_name = fields
            .get("log_stream_name")
            .and_then(Value::as_str)
            .map(String::from);

        Ok(Self {
            fields,
            log_stream_name,
        })
    }
}
