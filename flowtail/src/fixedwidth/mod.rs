//! Fixed-width record pattern generation.
//!
//! This module provides:
//! - Column descriptors for fixed-width record layouts
//! - Grok pattern generation for a managed ETL parsing engine

mod pattern;
mod spec;

pub use pattern::{build_pattern, GrokPattern, CATCH_ALL};
pub use spec::{columns_from_json, ColumnSpec};
