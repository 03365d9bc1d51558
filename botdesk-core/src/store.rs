//! In-memory cache of the payment collection.

use botdesk_sdk::objects::{Payment, PaymentStatus};
use tokio::sync::RwLock;
use tracing::debug;

use crate::remote::{FetchError, ReviewBackend};

/// Holds the payment collection as last retrieved from the backend.
///
/// The store is a pure data cache. It mutates in exactly two ways: a
/// wholesale replace on a successful [`load`](PaymentStore::load), and a
/// single-record [`patch_status`](PaymentStore::patch_status) after an
/// acknowledged review decision. Both go through one lock, so a refresh
/// and a patch cannot interleave mid-write.
#[derive(Debug, Default)]
pub struct PaymentStore {
    payments: RwLock<Vec<Payment>>,
}

impl PaymentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the collection with a fresh fetch from the backend.
    ///
    /// Last successful load wins; there is no merging. On failure the
    /// previous snapshot is left untouched so callers can keep showing
    /// stale-but-present data.
    pub async fn load<B: ReviewBackend + ?Sized>(
        &self,
        backend: &B,
    ) -> Result<Vec<Payment>, FetchError> {
        let fresh = backend.fetch_payments().await?;
        debug!(count = fresh.len(), "payment collection replaced");

        let mut payments = self.payments.write().await;
        *payments = fresh;
        Ok(payments.clone())
    }

    /// Update one record's status in place.
    ///
    /// Returns `false` when the id is absent: a concurrent refresh may
    /// have dropped the record, and that is not an error.
    pub async fn patch_status(&self, payment_id: &str, status: PaymentStatus) -> bool {
        let mut payments = self.payments.write().await;
        match payments.iter_mut().find(|p| p.id == payment_id) {
            Some(payment) => {
                payment.status = status;
                true
            }
            None => {
                debug!(payment_id = %payment_id, "patch skipped, record no longer present");
                false
            }
        }
    }

    /// Copy of the current collection. Later mutations are not observable
    /// through a snapshot already taken.
    pub async fn snapshot(&self) -> Vec<Payment> {
        self.payments.read().await.clone()
    }

    /// Look up a single record by id.
    pub async fn get(&self, payment_id: &str) -> Option<Payment> {
        self.payments
            .read()
            .await
            .iter()
            .find(|p| p.id == payment_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.payments.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.payments.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockBackend, payment};

    #[tokio::test]
    async fn test_load_replaces_wholesale() {
        let backend = MockBackend::with_payments(vec![
            payment("1", "bot1", PaymentStatus::Pending),
            payment("2", "bot2", PaymentStatus::Confirmed),
        ]);
        let store = PaymentStore::new();
        assert!(store.is_empty().await);

        let loaded = store.load(&backend).await.unwrap_or_default();
        assert_eq!(loaded.len(), 2);
        assert_eq!(store.len().await, 2);

        backend
            .set_payments(vec![payment("3", "bot1", PaymentStatus::Pending)])
            .await;
        store.load(&backend).await.unwrap_or_default();

        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "3");
        assert_eq!(
            backend.fetch_calls.load(std::sync::atomic::Ordering::SeqCst),
            2
        );
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_snapshot() {
        let backend =
            MockBackend::with_payments(vec![payment("1", "bot1", PaymentStatus::Pending)]);
        let store = PaymentStore::new();
        store.load(&backend).await.unwrap_or_default();

        backend.set_fail_fetch(true);
        let result = store.load(&backend).await;
        assert!(result.is_err());
        assert_eq!(store.len().await, 1);
        assert!(store.get("1").await.is_some());
    }

    #[tokio::test]
    async fn test_patch_status_present_and_absent() {
        let backend =
            MockBackend::with_payments(vec![payment("1", "bot1", PaymentStatus::Pending)]);
        let store = PaymentStore::new();
        store.load(&backend).await.unwrap_or_default();

        assert!(store.patch_status("1", PaymentStatus::Confirmed).await);
        assert!(
            matches!(store.get("1").await, Some(p) if p.status == PaymentStatus::Confirmed)
        );

        // Absent id is a no-op, not an error.
        assert!(!store.patch_status("ghost", PaymentStatus::Rejected).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_snapshot_does_not_observe_later_mutations() {
        let backend =
            MockBackend::with_payments(vec![payment("1", "bot1", PaymentStatus::Pending)]);
        let store = PaymentStore::new();
        store.load(&backend).await.unwrap_or_default();

        let before = store.snapshot().await;
        store.patch_status("1", PaymentStatus::Rejected).await;

        assert_eq!(before[0].status, PaymentStatus::Pending);
        let after = store.snapshot().await;
        assert_eq!(after[0].status, PaymentStatus::Rejected);
    }
}
