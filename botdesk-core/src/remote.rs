//! Backend seam for the review subsystem.
//!
//! Core components talk to the remote payments API through this trait so
//! the store, workflow and resolver can be driven against a test double.
//! The production implementation is [`DashboardClient`].

use async_trait::async_trait;
use botdesk_sdk::client::{ClientError, DashboardClient};
use botdesk_sdk::objects::{Payment, ReviewDecision};
use url::Url;

/// Remote operations the review subsystem consumes.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Fetch the full payment collection.
    async fn fetch_payments(&self) -> Result<Vec<Payment>, ClientError>;

    /// Apply a confirm/reject decision to one payment.
    ///
    /// The backend notifies the end user out of band and is not guaranteed
    /// idempotent; callers must suppress duplicate submissions locally.
    async fn submit_decision(
        &self,
        payment_id: &str,
        decision: ReviewDecision,
    ) -> Result<(), ClientError>;

    /// Resolve an opaque screenshot reference into a time-limited URL.
    async fn resolve_screenshot(&self, bot_id: &str, file_id: &str) -> Result<Url, ClientError>;
}

#[async_trait]
impl ReviewBackend for DashboardClient {
    async fn fetch_payments(&self) -> Result<Vec<Payment>, ClientError> {
        self.list_payments().await
    }

    async fn submit_decision(
        &self,
        payment_id: &str,
        decision: ReviewDecision,
    ) -> Result<(), ClientError> {
        self.update_payment(payment_id, decision).await.map(|_| ())
    }

    async fn resolve_screenshot(&self, bot_id: &str, file_id: &str) -> Result<Url, ClientError> {
        self.file_url(bot_id, file_id).await
    }
}

/// Read-path failure: the collection or a screenshot could not be fetched.
///
/// Never fatal; the previous snapshot (if any) stays in place and the
/// operation can be retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Backend request failed.
    #[error("backend request failed: {0}")]
    Backend(#[from] ClientError),
}
