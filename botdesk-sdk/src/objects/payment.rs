//! Payment records and review decisions.

use serde::{Deserialize, Serialize};

/// How the end user claims to have paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentType {
    Upi,
    Crypto,
}

/// Review lifecycle of a payment claim.
///
/// `Pending` is the only non-terminal state: a record moves to `Confirmed`
/// or `Rejected` exactly once and never leaves either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl PaymentStatus {
    /// Whether the record can still be decided.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PaymentStatus::Pending)
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "pending"),
            PaymentStatus::Confirmed => write!(f, "confirmed"),
            PaymentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// The operator's confirm/reject call on a pending payment.
///
/// Deliberately narrower than [`PaymentStatus`]: a decision can only name
/// one of the two terminal states, so "decide to pending" cannot be
/// expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Confirmed,
    Rejected,
}

impl From<ReviewDecision> for PaymentStatus {
    fn from(value: ReviewDecision) -> Self {
        match value {
            ReviewDecision::Confirmed => PaymentStatus::Confirmed,
            ReviewDecision::Rejected => PaymentStatus::Rejected,
        }
    }
}

impl std::fmt::Display for ReviewDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewDecision::Confirmed => write!(f, "confirmed"),
            ReviewDecision::Rejected => write!(f, "rejected"),
        }
    }
}

/// A user-submitted payment claim as stored by the backend.
///
/// Every field except `status` is immutable once the bot-side ingestion
/// path has written the record. `(bot_id, id)` never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Opaque unique identifier.
    pub id: String,
    /// The bot instance this payment was submitted to.
    pub bot_id: String,
    pub user_id: i64,
    pub username: Option<String>,
    pub payment_type: PaymentType,
    /// Opaque reference to the proof-of-payment image, when one was sent.
    pub screenshot_file_id: Option<String>,
    pub status: PaymentStatus,
    /// Unix seconds.
    pub created_at: i64,
    /// Unix seconds of the last status change, if any.
    pub updated_at: Option<i64>,
}

/// Request body for `PATCH /payments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentActionRequest {
    pub status: ReviewDecision,
}

/// Ack returned by the backend after a status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentActionAck {
    pub id: String,
    pub status: PaymentStatus,
}
