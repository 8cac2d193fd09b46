//! Log store protocol, log sinks, and the log fetcher.
//!
//! This module provides:
//! - Models for log events and pages
//! - The paginated log store protocol trait
//! - The caller-facing log sink trait and implementations
//! - Scan state for one stream fetch
//! - The fetcher that ties invocation and log capture together

mod cursor;
mod fetcher;
mod sink;
mod store;

pub use cursor::{
    end_marker, start_marker, LogStreamCursor, ScanStep, END_MARKER_PREFIX, START_MARKER_PREFIX,
};
pub use fetcher::{LogFetcher, LogFetcherBuilder};
pub use sink::{CollectingLogSink, LogLevel, LogSink, NoOpLogSink, TracingLogSink};
pub use store::{log_group_name, LogEvent, LogPage, LogStore};
