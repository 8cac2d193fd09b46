//! Canned payloads and event streams for tests.

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::invoke::InvocationResult;
use crate::logs::{end_marker, start_marker, LogEvent};

/// Returns a fresh correlation id in the platform's format.
#[must_use]
pub fn correlation_id() -> String {
    Uuid::new_v4().to_string()
}

/// Creates a log event stamped with the current time.
#[must_use]
pub fn event(message: &str) -> LogEvent {
    LogEvent::new(Utc::now(), message)
}

/// Builds a complete bracketed record: start marker, the given lines, end
/// marker.
#[must_use]
pub fn bracketed_stream(correlation_id: &str, lines: &[&str]) -> Vec<LogEvent> {
    let mut events = vec![event(&format!(
        "{} Version: $LATEST",
        start_marker(correlation_id)
    ))];
    events.extend(lines.iter().map(|line| event(line)));
    events.push(event(&end_marker(correlation_id)));
    events
}

/// Builds a successful invocation result whose body names a log stream.
#[must_use]
pub fn result_with_stream(correlation_id: &str, log_stream: &str) -> InvocationResult {
    let body = json!({"log_stream_name": log_stream, "status": "ok"}).to_string();
    InvocationResult::new(
        correlation_id,
        json!({"statusCode": 200, "body": body}),
    )
}
