//! # Flowtail
//!
//! Utility routines for pipeline tasks that invoke cloud functions and
//! capture their output.
//!
//! Flowtail provides two independent helpers:
//!
//! - **Log capture**: invoke a remote function and tail its bracketed log
//!   record into the task's own log output, retrying until the remote log
//!   store has fully ingested the stream
//! - **Fixed-width patterns**: build Grok pattern specifications for parsing
//!   fixed-width text records with a managed ETL engine
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use flowtail::prelude::*;
//!
//! let fetcher = LogFetcher::builder(invoker, store).build();
//! let request = InvocationRequest::new("ingest-orders", serde_json::json!({"day": "2024-06-01"}));
//! let body = fetcher.fetch(&request).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod clock;
pub mod errors;
pub mod fixedwidth;
pub mod invoke;
pub mod logs;
pub mod retry;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::clock::{Clock, TokioClock};
    pub use crate::errors::{
        BodyParseError, ExecutionFailedError, FlowtailError, InvokeError, LogStoreError,
        PatternError,
    };
    pub use crate::fixedwidth::{build_pattern, ColumnSpec, GrokPattern};
    pub use crate::invoke::{FunctionInvoker, InvocationRequest, InvocationResult, ResponseBody};
    pub use crate::logs::{
        log_group_name, LogEvent, LogFetcher, LogPage, LogSink, LogStore, LogStreamCursor,
        NoOpLogSink, TracingLogSink,
    };
    pub use crate::retry::RetryPolicy;
}
