//! Mock invoker, log store, and clock for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

use crate::clock::Clock;
use crate::errors::{InvokeError, LogStoreError};
use crate::invoke::{FunctionInvoker, InvocationRequest, InvocationResult};
use crate::logs::{LogEvent, LogPage, LogStore};

/// A mock invoker that records requests and returns a scripted result.
#[derive(Debug, Default)]
pub struct MockInvoker {
    result: Mutex<Option<InvocationResult>>,
    error: Mutex<Option<InvokeError>>,
    requests: Mutex<Vec<InvocationRequest>>,
}

impl MockInvoker {
    /// Creates a mock that returns the given result on every invoke.
    #[must_use]
    pub fn returning(result: InvocationResult) -> Self {
        Self {
            result: Mutex::new(Some(result)),
            ..Self::default()
        }
    }

    /// Creates a mock that fails every invoke with the given error.
    #[must_use]
    pub fn failing(error: InvokeError) -> Self {
        Self {
            error: Mutex::new(Some(error)),
            ..Self::default()
        }
    }

    /// Replaces the scripted result.
    pub fn respond_with(&self, result: InvocationResult) {
        *self.result.lock() = Some(result);
        *self.error.lock() = None;
    }

    /// Returns the recorded requests.
    #[must_use]
    pub fn requests(&self) -> Vec<InvocationRequest> {
        self.requests.lock().clone()
    }

    /// Returns the number of invokes performed.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl FunctionInvoker for MockInvoker {
    async fn invoke(&self, request: &InvocationRequest) -> Result<InvocationResult, InvokeError> {
        self.requests.lock().push(request.clone());

        if let Some(error) = self.error.lock().clone() {
            return Err(error);
        }

        self.result
            .lock()
            .clone()
            .ok_or_else(|| InvokeError::transport("no scripted result"))
    }
}

/// One scripted page of events.
#[derive(Debug, Clone)]
struct ScriptedPage {
    visible_after_calls: usize,
    events: Vec<LogEvent>,
}

/// An in-memory log store scripted page by page.
///
/// Pagination tokens are `p<index>`; the store echoes the incoming position
/// back as the next token once the scripted pages are exhausted, which is
/// how the real store signals "no further events right now". Pages can be
/// deferred until a number of event calls have been made, simulating
/// ingestion lag.
#[derive(Debug, Default)]
pub struct MemoryLogStore {
    pages: Mutex<Vec<ScriptedPage>>,
    visible_after: Mutex<usize>,
    describe_error: Mutex<Option<LogStoreError>>,
    get_error: Mutex<Option<LogStoreError>>,
    describe_calls: Mutex<usize>,
    get_calls: Mutex<usize>,
    queried_groups: Mutex<Vec<String>>,
    queried_streams: Mutex<Vec<String>>,
}

impl MemoryLogStore {
    /// Creates an empty store whose stream exists immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page of events, immediately visible.
    pub fn push_page(&self, events: Vec<LogEvent>) {
        self.push_page_after_calls(0, events);
    }

    /// Appends a page that only becomes visible once `calls` event
    /// retrievals have been made.
    pub fn push_page_after_calls(&self, calls: usize, events: Vec<LogEvent>) {
        self.pages.lock().push(ScriptedPage {
            visible_after_calls: calls,
            events,
        });
    }

    /// Makes the first `calls` existence queries report a missing stream.
    pub fn set_visible_after(&self, calls: usize) {
        *self.visible_after.lock() = calls;
    }

    /// Makes every existence query fail with the given error.
    pub fn fail_describe_with(&self, error: LogStoreError) {
        *self.describe_error.lock() = Some(error);
    }

    /// Makes every event retrieval fail with the given error.
    pub fn fail_get_with(&self, error: LogStoreError) {
        *self.get_error.lock() = Some(error);
    }

    /// Returns the number of existence queries made.
    #[must_use]
    pub fn describe_calls(&self) -> usize {
        *self.describe_calls.lock()
    }

    /// Returns the number of event retrievals made.
    #[must_use]
    pub fn get_calls(&self) -> usize {
        *self.get_calls.lock()
    }

    /// Returns every log group name queried, in order.
    #[must_use]
    pub fn queried_groups(&self) -> Vec<String> {
        self.queried_groups.lock().clone()
    }

    /// Returns every stream name queried, in order.
    #[must_use]
    pub fn queried_streams(&self) -> Vec<String> {
        self.queried_streams.lock().clone()
    }

    fn page_index(token: Option<&str>) -> usize {
        token
            .and_then(|t| t.strip_prefix('p'))
            .and_then(|t| t.parse::<usize>().ok())
            .unwrap_or(0)
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn stream_exists(
        &self,
        log_group: &str,
        stream_prefix: &str,
    ) -> Result<bool, LogStoreError> {
        self.queried_groups.lock().push(log_group.to_string());
        self.queried_streams.lock().push(stream_prefix.to_string());

        let seen = {
            let mut calls = self.describe_calls.lock();
            let seen = *calls;
            *calls += 1;
            seen
        };

        if let Some(error) = self.describe_error.lock().clone() {
            return Err(error);
        }

        if seen < *self.visible_after.lock() {
            return Err(LogStoreError::not_found(stream_prefix));
        }

        Ok(true)
    }

    async fn get_events(
        &self,
        log_group: &str,
        log_stream: &str,
        _from_head: bool,
        token: Option<&str>,
    ) -> Result<LogPage, LogStoreError> {
        self.queried_groups.lock().push(log_group.to_string());
        self.queried_streams.lock().push(log_stream.to_string());

        let seen = {
            let mut calls = self.get_calls.lock();
            let seen = *calls;
            *calls += 1;
            seen
        };

        if let Some(error) = self.get_error.lock().clone() {
            return Err(error);
        }

        let index = Self::page_index(token);
        let pages = self.pages.lock();
        let visible: Vec<&ScriptedPage> = pages
            .iter()
            .filter(|page| page.visible_after_calls <= seen)
            .collect();

        if index < visible.len() {
            Ok(LogPage::new(
                visible[index].events.clone(),
                Some(format!("p{}", index + 1)),
            ))
        } else {
            // Exhausted: echo the position back, like the real store.
            Ok(LogPage::new(Vec::new(), Some(format!("p{index}"))))
        }
    }
}

/// A clock that records requested sleeps and returns immediately.
#[derive(Debug, Default)]
pub struct ManualClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    /// Creates a new manual clock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the requested sleeps, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().clone()
    }

    /// Returns the number of sleeps requested.
    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().len()
    }

    /// Returns the total time that would have been slept.
    #[must_use]
    pub fn total_slept(&self) -> Duration {
        self.sleeps.lock().iter().sum()
    }
}

#[async_trait]
impl Clock for ManualClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().push(duration);
    }
}
