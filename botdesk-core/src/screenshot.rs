//! Screenshot viewer request lifecycle.
//!
//! Resolving a screenshot is a side lookup independent of review
//! decisions. The resolver models a single display slot: each `resolve`
//! supersedes the previous one, and a response that is no longer the
//! latest issued request is discarded on arrival. There is no true
//! network cancellation, only "ignore stale result".

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, warn};
use url::Url;

use crate::remote::{FetchError, ReviewBackend};

/// Observable state of the single-slot screenshot viewer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewerState {
    /// No viewer open.
    #[default]
    Idle,
    /// A resolve request is in flight.
    Loading,
    /// The latest request produced a displayable URL.
    Ready(Url),
    /// The latest request failed; dismissible by the caller.
    Failed,
}

/// Resolves opaque screenshot references into displayable URLs.
pub struct ScreenshotResolver<B> {
    backend: Arc<B>,
    seq: AtomicU64,
    slot: Mutex<Slot>,
}

#[derive(Debug)]
struct Slot {
    seq: u64,
    state: ViewerState,
}

impl<B: ReviewBackend> ScreenshotResolver<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            seq: AtomicU64::new(0),
            slot: Mutex::new(Slot {
                seq: 0,
                state: ViewerState::Idle,
            }),
        }
    }

    /// Current viewer state.
    pub async fn state(&self) -> ViewerState {
        self.slot.lock().await.state.clone()
    }

    /// Close the viewer. Any in-flight resolve becomes stale and its
    /// result is discarded when it arrives.
    pub async fn dismiss(&self) {
        let seq = self.next_seq();
        let mut slot = self.slot.lock().await;
        slot.seq = seq;
        slot.state = ViewerState::Idle;
    }

    /// Resolve `file_id` for display.
    ///
    /// Returns `Ok(Some(url))` when this request is still the latest and
    /// succeeded, `Ok(None)` when a newer request or a dismissal
    /// superseded it, and `Err` when it failed while still the latest.
    pub async fn resolve(&self, bot_id: &str, file_id: &str) -> Result<Option<Url>, FetchError> {
        let seq = self.next_seq();
        {
            let mut slot = self.slot.lock().await;
            if seq < slot.seq {
                // A newer request claimed the slot before this one got
                // scheduled; skip the lookup entirely.
                return Ok(None);
            }
            slot.seq = seq;
            slot.state = ViewerState::Loading;
        }

        let result = self.backend.resolve_screenshot(bot_id, file_id).await;

        let mut slot = self.slot.lock().await;
        if slot.seq != seq {
            debug!(file_id = %file_id, "stale screenshot result discarded");
            return Ok(None);
        }
        match result {
            Ok(url) => {
                slot.state = ViewerState::Ready(url.clone());
                Ok(Some(url))
            }
            Err(e) => {
                warn!(file_id = %file_id, error = %e, "screenshot resolution failed");
                slot.state = ViewerState::Failed;
                Err(FetchError::Backend(e))
            }
        }
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockBackend;
    use tokio::task::yield_now;

    #[tokio::test]
    async fn test_resolve_reaches_ready() {
        let backend = Arc::new(MockBackend::default());
        let resolver = ScreenshotResolver::new(Arc::clone(&backend));
        assert_eq!(resolver.state().await, ViewerState::Idle);

        let resolved = resolver.resolve("bot1", "ref1").await;
        assert!(
            matches!(resolved, Ok(Some(url)) if url.as_str() == "https://files.example/ref1")
        );
        assert!(
            matches!(resolver.state().await, ViewerState::Ready(url) if url.as_str() == "https://files.example/ref1")
        );
    }

    #[tokio::test]
    async fn test_failure_reaches_failed_and_is_dismissible() {
        let backend = Arc::new(MockBackend::default());
        backend.set_fail_resolve(true);
        let resolver = ScreenshotResolver::new(Arc::clone(&backend));

        let resolved = resolver.resolve("bot1", "ref1").await;
        assert!(resolved.is_err());
        assert_eq!(resolver.state().await, ViewerState::Failed);

        resolver.dismiss().await;
        assert_eq!(resolver.state().await, ViewerState::Idle);
    }

    #[tokio::test]
    async fn test_late_result_does_not_clobber_newer_request() {
        let backend = Arc::new(MockBackend::default());
        let resolver = Arc::new(ScreenshotResolver::new(Arc::clone(&backend)));
        let gate = backend.hold_resolve("ref1").await;

        let stale = {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("bot1", "ref1").await })
        };
        while backend.resolve_calls.load(std::sync::atomic::Ordering::SeqCst) == 0 {
            yield_now().await;
        }

        // Operator clicks a different row before ref1 comes back.
        let fresh = resolver.resolve("bot1", "ref2").await;
        assert!(
            matches!(fresh, Ok(Some(url)) if url.as_str() == "https://files.example/ref2")
        );

        gate.notify_one();
        let stale = stale.await;
        assert!(matches!(stale, Ok(Ok(None))));
        assert!(
            matches!(resolver.state().await, ViewerState::Ready(url) if url.as_str() == "https://files.example/ref2")
        );
    }

    #[tokio::test]
    async fn test_dismiss_invalidates_in_flight_request() {
        let backend = Arc::new(MockBackend::default());
        let resolver = Arc::new(ScreenshotResolver::new(Arc::clone(&backend)));
        let gate = backend.hold_resolve("ref1").await;

        let in_flight = {
            let resolver = Arc::clone(&resolver);
            tokio::spawn(async move { resolver.resolve("bot1", "ref1").await })
        };
        while backend.resolve_calls.load(std::sync::atomic::Ordering::SeqCst) == 0 {
            yield_now().await;
        }

        resolver.dismiss().await;
        gate.notify_one();

        let result = in_flight.await;
        assert!(matches!(result, Ok(Ok(None))));
        assert_eq!(resolver.state().await, ViewerState::Idle);
    }
}
