//! Protocol trait and models for the remote log store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::LogStoreError;

/// Prefix for log group names derived from function names.
const LOG_GROUP_PREFIX: &str = "/aws/lambda/";

/// Derives the log group name for a function.
#[must_use]
pub fn log_group_name(function_name: &str) -> String {
    format!("{LOG_GROUP_PREFIX}{function_name}")
}

/// A single timestamped log event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Ingestion timestamp of the event.
    pub timestamp: DateTime<Utc>,
    /// Raw message text.
    pub message: String,
}

impl LogEvent {
    /// Creates a new log event.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            timestamp,
            message: message.into(),
        }
    }
}

/// One page of log events plus the token for the next page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogPage {
    /// Events in this page, oldest first.
    pub events: Vec<LogEvent>,
    /// Opaque cursor for the next page. A repeated or absent token means no
    /// further events are available right now.
    pub next_forward_token: Option<String>,
}

impl LogPage {
    /// Creates a new page.
    #[must_use]
    pub fn new(events: Vec<LogEvent>, next_forward_token: Option<String>) -> Self {
        Self {
            events,
            next_forward_token,
        }
    }
}

/// Protocol for the paginated log store API.
///
/// Mirrors the two calls the fetch routine needs: a stream-existence query
/// by name prefix and a paged event retrieval. Implementations report a
/// missing group or stream as [`LogStoreError::NotFound`]; everything else
/// is [`LogStoreError::Api`].
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Returns whether a stream matching the prefix exists in the group.
    async fn stream_exists(
        &self,
        log_group: &str,
        stream_prefix: &str,
    ) -> Result<bool, LogStoreError>;

    /// Fetches one page of events for a stream.
    ///
    /// `from_head` requests events from the earliest available position;
    /// `token` continues from a previously returned page.
    async fn get_events(
        &self,
        log_group: &str,
        log_stream: &str,
        from_head: bool,
        token: Option<&str>,
    ) -> Result<LogPage, LogStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_group_name_derivation() {
        assert_eq!(log_group_name("ingest-orders"), "/aws/lambda/ingest-orders");
    }

    #[test]
    fn test_log_page_default_is_empty() {
        let page = LogPage::default();
        assert!(page.events.is_empty());
        assert_eq!(page.next_forward_token, None);
    }

    #[test]
    fn test_log_event_serde_round_trip() {
        let event = LogEvent::new(Utc::now(), "START RequestId: abc");
        let text = serde_json::to_string(&event).expect("serialize");
        let back: LogEvent = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, event);
    }
}
