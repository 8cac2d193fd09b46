//! Protocol trait for the invocation API.

use async_trait::async_trait;

use super::models::{InvocationRequest, InvocationResult};
use crate::errors::InvokeError;

/// Protocol for request/response function invocation.
///
/// Implementations wrap the platform's synchronous invocation API: they
/// submit the payload, wait for the execution to finish, and return the
/// correlation id and response payload. Transport failures surface as
/// [`InvokeError`]; an execution-level failure of the function itself is
/// reported inside the result, not as an error.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    /// Invokes the function and returns the platform's response.
    async fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult, InvokeError>;
}
