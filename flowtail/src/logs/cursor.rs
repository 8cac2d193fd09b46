//! Scan state for one log-stream fetch.

/// Prefix of the sentinel line opening one execution's output.
pub const START_MARKER_PREFIX: &str = "START RequestId: ";

/// Prefix of the sentinel line closing one execution's output.
pub const END_MARKER_PREFIX: &str = "END RequestId: ";

/// Returns the start marker for a correlation id.
#[must_use]
pub fn start_marker(correlation_id: &str) -> String {
    format!("{START_MARKER_PREFIX}{correlation_id}")
}

/// Returns the end marker for a correlation id.
#[must_use]
pub fn end_marker(correlation_id: &str) -> String {
    format!("{END_MARKER_PREFIX}{correlation_id}")
}

/// What to do with one scanned event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanStep {
    /// Forward the event to the log sink.
    pub forward: bool,
    /// The end marker was observed; stop scanning.
    pub complete: bool,
}

/// Pagination and marker state for one fetch operation.
///
/// Owned exclusively by a single fetch and discarded afterwards. Marker
/// state survives across fetch attempts: a start marker seen on one attempt
/// is not required again on the next.
#[derive(Debug, Clone)]
pub struct LogStreamCursor {
    log_group: String,
    log_stream: String,
    token: Option<String>,
    found_start: bool,
    found_end: bool,
}

impl LogStreamCursor {
    /// Creates a cursor over one stream.
    #[must_use]
    pub fn new(log_group: impl Into<String>, log_stream: impl Into<String>) -> Self {
        Self {
            log_group: log_group.into(),
            log_stream: log_stream.into(),
            token: None,
            found_start: false,
            found_end: false,
        }
    }

    /// Returns the log group name.
    #[must_use]
    pub fn log_group(&self) -> &str {
        &self.log_group
    }

    /// Returns the log stream name.
    #[must_use]
    pub fn log_stream(&self) -> &str {
        &self.log_stream
    }

    /// Returns the current pagination token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the start marker has been observed.
    #[must_use]
    pub fn found_start(&self) -> bool {
        self.found_start
    }

    /// Whether the end marker has been observed.
    #[must_use]
    pub fn found_end(&self) -> bool {
        self.found_end
    }

    /// Whether a complete bracketed record has been observed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.found_end
    }

    /// Scans one event message against the correlation id markers.
    ///
    /// Output stays suppressed until the start marker for the id is seen;
    /// from the start marker on, every event is forwarded. The end marker
    /// completes the scan even when the start marker was never observed.
    pub fn observe(&mut self, message: &str, correlation_id: &str) -> ScanStep {
        if !self.found_start && message.contains(&start_marker(correlation_id)) {
            self.found_start = true;
        }

        let forward = self.found_start;

        if message.contains(&end_marker(correlation_id)) {
            self.found_end = true;
            return ScanStep {
                forward,
                complete: true,
            };
        }

        ScanStep {
            forward,
            complete: false,
        }
    }

    /// Advances the pagination token.
    ///
    /// Returns `true` when the store handed back a new, different token. A
    /// repeated or absent token means the page is exhausted for this
    /// attempt.
    pub fn advance(&mut self, next_token: Option<String>) -> bool {
        match next_token {
            Some(token) if self.token.as_deref() != Some(token.as_str()) => {
                self.token = Some(token);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ID: &str = "8f2c1a7e";

    #[test]
    fn test_marker_helpers() {
        assert_eq!(start_marker(ID), "START RequestId: 8f2c1a7e");
        assert_eq!(end_marker(ID), "END RequestId: 8f2c1a7e");
    }

    #[test]
    fn test_observe_suppresses_until_start_marker() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");

        let step = cursor.observe("some unrelated event", ID);
        assert!(!step.forward);
        assert!(!step.complete);
        assert!(!cursor.found_start());
    }

    #[test]
    fn test_observe_forwards_from_start_marker() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");

        let step = cursor.observe(&format!("START RequestId: {ID} Version: $LATEST"), ID);
        assert!(step.forward);
        assert!(!step.complete);

        let step = cursor.observe("processing 42 rows", ID);
        assert!(step.forward);
        assert!(!step.complete);
    }

    #[test]
    fn test_observe_completes_on_end_marker() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");
        cursor.observe(&start_marker(ID), ID);

        let step = cursor.observe(&format!("END RequestId: {ID}"), ID);
        assert!(step.forward);
        assert!(step.complete);
        assert!(cursor.is_complete());
    }

    #[test]
    fn test_observe_end_without_start_completes_without_forwarding() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");

        let step = cursor.observe(&end_marker(ID), ID);
        assert!(!step.forward);
        assert!(step.complete);
    }

    #[test]
    fn test_observe_ignores_markers_for_other_ids() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");

        let step = cursor.observe("START RequestId: other-id Version: $LATEST", ID);
        assert!(!step.forward);
        assert!(!step.complete);

        let step = cursor.observe("END RequestId: other-id", ID);
        assert!(!step.forward);
        assert!(!step.complete);
    }

    #[test]
    fn test_marker_state_survives_between_scans() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");
        cursor.observe(&start_marker(ID), ID);

        // A later attempt re-reads from an arbitrary position; forwarding
        // stays on.
        let step = cursor.observe("line from a later attempt", ID);
        assert!(step.forward);
    }

    #[test]
    fn test_advance_accepts_new_token() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");

        assert!(cursor.advance(Some("token-1".to_string())));
        assert_eq!(cursor.token(), Some("token-1"));

        assert!(cursor.advance(Some("token-2".to_string())));
        assert_eq!(cursor.token(), Some("token-2"));
    }

    #[test]
    fn test_advance_rejects_repeated_token() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");

        assert!(cursor.advance(Some("token-1".to_string())));
        assert!(!cursor.advance(Some("token-1".to_string())));
        assert_eq!(cursor.token(), Some("token-1"));
    }

    #[test]
    fn test_advance_rejects_absent_token() {
        let mut cursor = LogStreamCursor::new("/aws/lambda/fn", "stream");
        assert!(!cursor.advance(None));
        assert_eq!(cursor.token(), None);
    }
}
