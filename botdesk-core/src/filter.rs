//! Pure views over a payment collection.
//!
//! Filtering and counting never touch the store: they take a snapshot
//! slice and build a new list, so the presentation layer can recompute
//! views as often as it likes. `by_bot` and `by_status` commute, and
//! `None` is the identity filter on either axis.

use botdesk_sdk::objects::{Payment, PaymentStatus};
use serde::Serialize;

/// Aggregate counts over a collection.
///
/// `pending + confirmed + rejected` always equals `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PaymentCounts {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub rejected: usize,
}

/// Keep only payments owned by `bot_id`; `None` keeps everything.
pub fn by_bot(payments: &[Payment], bot_id: Option<&str>) -> Vec<Payment> {
    match bot_id {
        None => payments.to_vec(),
        Some(bot_id) => payments
            .iter()
            .filter(|p| p.bot_id == bot_id)
            .cloned()
            .collect(),
    }
}

/// Keep only payments in `status`; `None` keeps everything.
pub fn by_status(payments: &[Payment], status: Option<PaymentStatus>) -> Vec<Payment> {
    match status {
        None => payments.to_vec(),
        Some(status) => payments
            .iter()
            .filter(|p| p.status == status)
            .cloned()
            .collect(),
    }
}

/// Count a collection by status in one pass.
pub fn counts(payments: &[Payment]) -> PaymentCounts {
    let mut counts = PaymentCounts {
        total: payments.len(),
        ..PaymentCounts::default()
    };
    for payment in payments {
        match payment.status {
            PaymentStatus::Pending => counts.pending += 1,
            PaymentStatus::Confirmed => counts.confirmed += 1,
            PaymentStatus::Rejected => counts.rejected += 1,
        }
    }
    counts
}

/// Counts for one bot's slice of the collection (`None` = all bots).
///
/// Feeds the per-bot stat cards next to the global totals.
pub fn counts_for_bot(payments: &[Payment], bot_id: Option<&str>) -> PaymentCounts {
    counts(&by_bot(payments, bot_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::payment;

    fn sample() -> Vec<Payment> {
        vec![
            payment("1", "bot1", PaymentStatus::Pending),
            payment("2", "bot1", PaymentStatus::Confirmed),
            payment("3", "bot2", PaymentStatus::Pending),
            payment("4", "bot2", PaymentStatus::Rejected),
            payment("5", "bot3", PaymentStatus::Confirmed),
        ]
    }

    fn ids(payments: &[Payment]) -> Vec<&str> {
        payments.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_none_is_identity() {
        let all = sample();
        assert_eq!(by_bot(&all, None), all);
        assert_eq!(by_status(&all, None), all);
    }

    #[test]
    fn test_counts_are_additive() {
        let all = sample();
        let c = counts(&all);
        assert_eq!(c.total, 5);
        assert_eq!(c.pending + c.confirmed + c.rejected, c.total);
        assert_eq!(counts(&[]), PaymentCounts::default());
    }

    #[test]
    fn test_bot_and_status_filters_commute() {
        let all = sample();
        let bots = [None, Some("bot1"), Some("bot2"), Some("nope")];
        let statuses = [
            None,
            Some(PaymentStatus::Pending),
            Some(PaymentStatus::Confirmed),
            Some(PaymentStatus::Rejected),
        ];
        for bot in bots {
            for status in statuses {
                let bot_first = by_status(&by_bot(&all, bot), status);
                let status_first = by_bot(&by_status(&all, status), bot);
                assert_eq!(ids(&bot_first), ids(&status_first));
            }
        }
    }

    #[test]
    fn test_per_bot_counts() {
        let all = sample();
        let bot2 = counts_for_bot(&all, Some("bot2"));
        assert_eq!(bot2.total, 2);
        assert_eq!(bot2.pending, 1);
        assert_eq!(bot2.rejected, 1);
        assert_eq!(counts_for_bot(&all, None), counts(&all));
        assert_eq!(counts_for_bot(&all, Some("ghost")), PaymentCounts::default());
    }
}
