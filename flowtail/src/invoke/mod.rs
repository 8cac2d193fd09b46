//! Invocation API models and protocol trait.

mod invoker;
mod models;

pub use invoker::FunctionInvoker;
pub use models::{InvocationRequest, InvocationResult, ResponseBody};
