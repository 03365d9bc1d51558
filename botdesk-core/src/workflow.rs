//! Review decision state machine.
//!
//! The workflow drives a payment's only mutable transition, pending →
//! confirmed/rejected:
//! - Checks the local record before issuing the remote update, so a
//!   duplicate or late click never reaches the backend (the backend fires
//!   a user notification per accepted update and is not idempotent).
//! - Holds the id in a busy set while the update is in flight; other
//!   records stay independently actionable.
//! - Patches the store only after the backend acknowledged the new
//!   status. The remote system is the source of truth; there is no
//!   optimistic local update to roll back.

use std::collections::HashSet;
use std::sync::Arc;

use botdesk_sdk::client::ClientError;
use botdesk_sdk::objects::{PaymentStatus, ReviewDecision};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::remote::ReviewBackend;
use crate::store::PaymentStore;

/// Errors from [`ReviewWorkflow::decide`].
#[derive(Debug, thiserror::Error)]
pub enum DecideError {
    /// No record with this id is in the local collection.
    #[error("payment {0} not found")]
    NotFound(String),

    /// The record already reached a terminal status.
    #[error("payment {id} is already {status}")]
    NotPending { id: String, status: PaymentStatus },

    /// Another decision for this record is still in flight.
    #[error("payment {0} already has a decision in flight")]
    InFlight(String),

    /// The remote status update failed. The record is still pending and
    /// the decision can be retried.
    #[error("status update failed: {0}")]
    Remote(#[from] ClientError),
}

impl DecideError {
    /// Local precondition failures. These never produced a remote call
    /// and are resolved entirely client-side by refusing the action.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            DecideError::NotFound(_) | DecideError::NotPending { .. } | DecideError::InFlight(_)
        )
    }
}

/// Applies operator decisions to pending payments, one in flight per
/// record.
pub struct ReviewWorkflow<B> {
    backend: Arc<B>,
    store: Arc<PaymentStore>,
    busy: Mutex<HashSet<String>>,
}

impl<B: ReviewBackend> ReviewWorkflow<B> {
    pub fn new(backend: Arc<B>, store: Arc<PaymentStore>) -> Self {
        Self {
            backend,
            store,
            busy: Mutex::new(HashSet::new()),
        }
    }

    /// Whether a decision for this record is currently in flight.
    ///
    /// Callers use this to disable the confirm/reject controls for that
    /// row only.
    pub async fn is_busy(&self, payment_id: &str) -> bool {
        self.busy.lock().await.contains(payment_id)
    }

    /// Apply a confirm/reject decision to a pending payment.
    ///
    /// Fails with an [invalid-state](DecideError::is_invalid_state) error
    /// and issues no remote call when the record is missing, already
    /// decided, or already busy. On success the local record carries the
    /// new terminal status and the returned decision tells the caller
    /// which outcome to announce; the backend notifies the end user out
    /// of band.
    pub async fn decide(
        &self,
        payment_id: &str,
        decision: ReviewDecision,
    ) -> Result<ReviewDecision, DecideError> {
        {
            // Guard and busy-mark under one lock so two racing calls on
            // the same record cannot both pass.
            let mut busy = self.busy.lock().await;
            if busy.contains(payment_id) {
                return Err(DecideError::InFlight(payment_id.to_owned()));
            }
            match self.store.get(payment_id).await {
                None => return Err(DecideError::NotFound(payment_id.to_owned())),
                Some(p) if p.status != PaymentStatus::Pending => {
                    return Err(DecideError::NotPending {
                        id: payment_id.to_owned(),
                        status: p.status,
                    });
                }
                Some(_) => {}
            }
            busy.insert(payment_id.to_owned());
        }

        let result = self.backend.submit_decision(payment_id, decision).await;
        self.busy.lock().await.remove(payment_id);

        match result {
            Ok(()) => {
                let patched = self.store.patch_status(payment_id, decision.into()).await;
                if patched {
                    info!(payment_id = %payment_id, outcome = %decision, "payment decision applied");
                } else {
                    // A refresh completed while the update was in flight
                    // and dropped the record; the ack is discarded.
                    info!(payment_id = %payment_id, outcome = %decision, "decision acknowledged for a record dropped by refresh");
                }
                Ok(decision)
            }
            Err(e) => {
                warn!(payment_id = %payment_id, outcome = %decision, error = %e, "payment decision failed, record left pending");
                Err(DecideError::Remote(e))
            }
        }
    }
}
