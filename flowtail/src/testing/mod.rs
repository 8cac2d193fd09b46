//! Test doubles and fixtures for exercising fetch flows without a cloud
//! account.

mod fixtures;
mod mocks;

pub use fixtures::{bracketed_stream, correlation_id, event, result_with_stream};
pub use mocks::{ManualClock, MemoryLogStore, MockInvoker};
