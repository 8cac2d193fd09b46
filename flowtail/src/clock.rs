//! Time source abstraction for retry delays.

use async_trait::async_trait;
use std::time::Duration;

/// Capability trait for sleeping between retry attempts.
///
/// The fetch routine never calls the timer directly; it goes through an
/// injected clock so tests can substitute a manual implementation and
/// observe requested delays instead of waiting them out.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Sleeps for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Clock backed by the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_tokio_clock_sleeps() {
        let clock = TokioClock;
        let start = std::time::Instant::now();
        clock.sleep(Duration::from_millis(10)).await;
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
