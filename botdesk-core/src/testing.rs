//! Shared test doubles for the review subsystem.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use botdesk_sdk::client::ClientError;
use botdesk_sdk::objects::{BotInfo, Payment, PaymentStatus, PaymentType, ReviewDecision};
use tokio::sync::{Mutex, Notify};
use url::Url;

use crate::remote::ReviewBackend;

pub(crate) fn payment(id: &str, bot_id: &str, status: PaymentStatus) -> Payment {
    Payment {
        id: id.to_string(),
        bot_id: bot_id.to_string(),
        user_id: 42,
        username: Some("tester".to_string()),
        payment_type: PaymentType::Upi,
        screenshot_file_id: Some(format!("file-{id}")),
        status,
        created_at: 1_722_800_000,
        updated_at: None,
    }
}

pub(crate) fn bot(bot_id: &str, username: &str) -> BotInfo {
    BotInfo {
        bot_id: bot_id.to_string(),
        username: username.to_string(),
        display_name: None,
    }
}

fn api_error() -> ClientError {
    ClientError::Api {
        status: reqwest::StatusCode::BAD_GATEWAY,
        body: "upstream unavailable".to_string(),
    }
}

/// Scriptable [`ReviewBackend`] double.
///
/// Counts calls, can be flipped into failure modes, and can park
/// `submit_decision` / `resolve_screenshot` on a [`Notify`] gate so tests
/// hold a request in flight while they poke at the components.
#[derive(Default)]
pub(crate) struct MockBackend {
    payments: Mutex<Vec<Payment>>,
    fail_fetch: AtomicBool,
    fail_decide: AtomicBool,
    fail_resolve: AtomicBool,
    decide_gate: Mutex<Option<Arc<Notify>>>,
    resolve_gates: Mutex<HashMap<String, Arc<Notify>>>,
    pub fetch_calls: AtomicUsize,
    pub decide_calls: AtomicUsize,
    pub resolve_calls: AtomicUsize,
}

impl MockBackend {
    pub fn with_payments(payments: Vec<Payment>) -> Self {
        Self {
            payments: Mutex::new(payments),
            ..Self::default()
        }
    }

    pub async fn set_payments(&self, payments: Vec<Payment>) {
        *self.payments.lock().await = payments;
    }

    pub fn set_fail_fetch(&self, fail: bool) {
        self.fail_fetch.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_decide(&self, fail: bool) {
        self.fail_decide.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_resolve(&self, fail: bool) {
        self.fail_resolve.store(fail, Ordering::SeqCst);
    }

    /// Park every `submit_decision` call until the returned gate is
    /// notified (one permit per call).
    pub async fn hold_decisions(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.decide_gate.lock().await = Some(Arc::clone(&gate));
        gate
    }

    /// Park `resolve_screenshot` calls for `file_id` until the returned
    /// gate is notified.
    pub async fn hold_resolve(&self, file_id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.resolve_gates
            .lock()
            .await
            .insert(file_id.to_string(), Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl ReviewBackend for MockBackend {
    async fn fetch_payments(&self) -> Result<Vec<Payment>, ClientError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(api_error());
        }
        Ok(self.payments.lock().await.clone())
    }

    async fn submit_decision(
        &self,
        _payment_id: &str,
        _decision: ReviewDecision,
    ) -> Result<(), ClientError> {
        self.decide_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.decide_gate.lock().await.clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_decide.load(Ordering::SeqCst) {
            return Err(api_error());
        }
        Ok(())
    }

    async fn resolve_screenshot(&self, _bot_id: &str, file_id: &str) -> Result<Url, ClientError> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);
        let gate = self.resolve_gates.lock().await.get(file_id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.fail_resolve.load(Ordering::SeqCst) {
            return Err(api_error());
        }
        Url::parse(&format!("https://files.example/{file_id}")).map_err(ClientError::Url)
    }
}
