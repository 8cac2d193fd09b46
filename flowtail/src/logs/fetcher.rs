//! Invokes a function and tails its log stream into the caller's sink.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::cursor::LogStreamCursor;
use super::sink::{LogSink, TracingLogSink};
use super::store::{log_group_name, LogStore};
use crate::clock::{Clock, TokioClock};
use crate::errors::{ExecutionFailedError, FlowtailError, LogStoreError};
use crate::invoke::{FunctionInvoker, InvocationRequest, ResponseBody};
use crate::retry::RetryPolicy;

/// Invokes a remote function and forwards its bracketed log record to a log
/// sink, retrying until the record is fully ingested.
///
/// Log retrieval is best-effort observability: the fetch fails only when
/// the invocation's own result is unusable. An unreadable body, a missing
/// stream identifier, or an incomplete record after retry exhaustion all
/// degrade to sink warnings while the parsed body is still returned.
pub struct LogFetcher {
    invoker: Arc<dyn FunctionInvoker>,
    store: Arc<dyn LogStore>,
    sink: Arc<dyn LogSink>,
    clock: Arc<dyn Clock>,
    stream_wait: RetryPolicy,
    fetch_retry: RetryPolicy,
}

impl fmt::Debug for LogFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFetcher")
            .field("stream_wait", &self.stream_wait)
            .field("fetch_retry", &self.fetch_retry)
            .finish_non_exhaustive()
    }
}

impl LogFetcher {
    /// Starts building a fetcher over the given invoker and log store.
    #[must_use]
    pub fn builder(
        invoker: Arc<dyn FunctionInvoker>,
        store: Arc<dyn LogStore>,
    ) -> LogFetcherBuilder {
        LogFetcherBuilder::new(invoker, store)
    }

    /// Invokes the function and tails its log record into the sink.
    ///
    /// Returns the best-effort parsed response body. An execution-level
    /// failure of the function raises [`FlowtailError::ExecutionFailed`]
    /// before any log-store call; a store failure during the stream
    /// existence poll propagates as [`FlowtailError::LogStore`]. Everything
    /// else degrades gracefully.
    pub async fn fetch(
        &self,
        request: &InvocationRequest,
    ) -> Result<Map<String, Value>, FlowtailError> {
        self.sink
            .info(&format!("Invoking function: {}", request.function_name()));

        let result = self.invoker.invoke(request).await?;

        self.sink.info(&format!(
            "Function executed with correlation id: {}",
            result.correlation_id()
        ));
        self.sink
            .info(&format!("Response payload: {}", result.payload()));

        let body = match ResponseBody::parse(result.payload()) {
            Ok(body) => body,
            Err(err) => {
                self.sink.warning(&format!(
                    "Could not parse response body, cannot fetch logs: {err}"
                ));
                ResponseBody::default()
            }
        };

        if result.is_failure() {
            return Err(ExecutionFailedError::new(result.correlation_id(), body.fields).into());
        }

        let Some(log_stream) = body.log_stream_name.clone() else {
            self.sink.warning(
                "Response did not name a log stream; check the log store directly for output.",
            );
            return Ok(body.fields);
        };

        let mut cursor = LogStreamCursor::new(log_group_name(request.function_name()), log_stream);

        self.wait_for_stream(&cursor).await?;

        if let Err(err) = self.tail_stream(&mut cursor, result.correlation_id()).await {
            self.sink
                .error(&format!("Unexpected error while fetching logs: {err}"));
        }

        Ok(body.fields)
    }

    /// Polls for the stream's existence to absorb ingestion lag.
    ///
    /// Not-found responses wait and retry on the stream-wait policy; any
    /// other store error propagates. Exhausting the poll falls through to
    /// the fetch phase, which will simply find no events and report an
    /// incomplete record.
    async fn wait_for_stream(&self, cursor: &LogStreamCursor) -> Result<(), FlowtailError> {
        self.sink.info(&format!(
            "Waiting for log stream '{}' to become available...",
            cursor.log_stream()
        ));

        for attempt in 1..=self.stream_wait.max_attempts {
            match self
                .store
                .stream_exists(cursor.log_group(), cursor.log_stream())
                .await
            {
                Ok(true) => return Ok(()),
                Ok(false) | Err(LogStoreError::NotFound { .. }) => {
                    self.sink.warning(&format!(
                        "Attempt {attempt}: log stream not yet found. Retrying in {} seconds...",
                        self.stream_wait.delay().as_secs()
                    ));
                    self.clock.sleep(self.stream_wait.delay()).await;
                }
                Err(err) => {
                    self.sink.error(&format!(
                        "Unexpected error while describing log streams: {err}"
                    ));
                    return Err(err.into());
                }
            }
        }

        Ok(())
    }

    /// Pages through the stream until a complete record is seen or the
    /// fetch policy is exhausted.
    ///
    /// Marker state persists across attempts. Store errors abort the tail
    /// and bubble up for the caller to log and suppress.
    async fn tail_stream(
        &self,
        cursor: &mut LogStreamCursor,
        correlation_id: &str,
    ) -> Result<(), LogStoreError> {
        self.sink.info("Attempting to fetch logs from stream");

        for attempt in 1..=self.fetch_retry.max_attempts {
            self.sink.info(&format!(
                "--- Log Fetch Attempt {attempt}/{} for correlation id {correlation_id} ---",
                self.fetch_retry.max_attempts
            ));

            'paging: loop {
                let page = self
                    .store
                    .get_events(cursor.log_group(), cursor.log_stream(), true, cursor.token())
                    .await?;

                for event in &page.events {
                    let step = cursor.observe(&event.message, correlation_id);
                    if step.forward {
                        self.sink.info(event.message.trim());
                    }
                    if step.complete {
                        break 'paging;
                    }
                }

                if !cursor.advance(page.next_forward_token) {
                    // Reached the end of the currently available events.
                    break;
                }
            }

            if cursor.is_complete() {
                self.sink.info("--- End of Log ---");
                return Ok(());
            }

            if !cursor.found_start() {
                self.sink.warning(&format!(
                    "Attempt {attempt}: did not find the start marker. Logs may still be ingesting. Retrying in {} seconds...",
                    self.fetch_retry.delay().as_secs()
                ));
            }

            self.clock.sleep(self.fetch_retry.delay()).await;
        }

        self.sink.error(&format!(
            "Failed to fetch a complete log record for correlation id {correlation_id} after all retries."
        ));

        Ok(())
    }
}

/// Builder for [`LogFetcher`].
///
/// The invoker and store are required; the sink defaults to
/// [`TracingLogSink`], the clock to the Tokio timer, and the retry policies
/// to [`RetryPolicy::stream_wait`] and [`RetryPolicy::log_fetch`].
pub struct LogFetcherBuilder {
    invoker: Arc<dyn FunctionInvoker>,
    store: Arc<dyn LogStore>,
    sink: Option<Arc<dyn LogSink>>,
    clock: Option<Arc<dyn Clock>>,
    stream_wait: RetryPolicy,
    fetch_retry: RetryPolicy,
}

impl LogFetcherBuilder {
    fn new(invoker: Arc<dyn FunctionInvoker>, store: Arc<dyn LogStore>) -> Self {
        Self {
            invoker,
            store,
            sink: None,
            clock: None,
            stream_wait: RetryPolicy::stream_wait(),
            fetch_retry: RetryPolicy::log_fetch(),
        }
    }

    /// Sets the log sink.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Sets the clock.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Sets the stream-existence poll policy.
    #[must_use]
    pub fn with_stream_wait(mut self, policy: RetryPolicy) -> Self {
        self.stream_wait = policy;
        self
    }

    /// Sets the log fetch retry policy.
    #[must_use]
    pub fn with_fetch_retry(mut self, policy: RetryPolicy) -> Self {
        self.fetch_retry = policy;
        self
    }

    /// Builds the fetcher.
    #[must_use]
    pub fn build(self) -> LogFetcher {
        LogFetcher {
            invoker: self.invoker,
            store: self.store,
            sink: self.sink.unwrap_or_else(|| Arc::new(TracingLogSink)),
            clock: self.clock.unwrap_or_else(|| Arc::new(TokioClock)),
            stream_wait: self.stream_wait,
            fetch_retry: self.fetch_retry,
        }
    }
}
