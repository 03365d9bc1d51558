//! Dashboard API client (admin dashboard → Botdesk backend).
//!
//! All authenticated requests carry the opaque session token in the
//! `x-api-key` header.

use std::collections::HashMap;

use reqwest::Client;
use url::Url;

use super::ClientError;
use crate::objects::auth::{API_KEY_HEADER, LoginRequest, LoginResponse};
use crate::objects::bot::BotInfo;
use crate::objects::config::{ConfigEntry, ConfigKey, ConfigUpdate};
use crate::objects::files::{FileUrlResponse, UploadResponse};
use crate::objects::payment::{Payment, PaymentActionAck, PaymentActionRequest, ReviewDecision};

/// Typed HTTP client for the Botdesk backend API.
///
/// Construct with [`new`](DashboardClient::new) when a token is already
/// cached, or [`login`](DashboardClient::login) to exchange the operator
/// password for a fresh one.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl DashboardClient {
    /// Create a client around an existing token.
    ///
    /// * `base_url` – root URL of the backend.
    /// * `token` – the opaque credential from a previous login.
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `POST /auth/login` – exchange the operator password for a token and
    /// return an authenticated client.
    pub async fn login(base_url: Url, password: &str) -> Result<Self, ClientError> {
        let http = Client::new();
        let url = base_url.join("/auth/login")?;

        let resp = http
            .post(url)
            .json(&LoginRequest {
                password: password.to_owned(),
            })
            .send()
            .await?;

        let LoginResponse { token } = parse_response(resp).await?;

        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    /// The opaque credential this client authenticates with.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `GET /bots` – list configured bot instances.
    pub async fn list_bots(&self) -> Result<Vec<BotInfo>, ClientError> {
        let url = self.base_url.join("/bots")?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /payments` – the full payment collection across all bots,
    /// newest first. No pagination; callers replace their cache wholesale.
    pub async fn list_payments(&self) -> Result<Vec<Payment>, ClientError> {
        let url = self.base_url.join("/payments")?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `PATCH /payments/{id}` – apply a confirm/reject decision.
    ///
    /// The backend notifies the end user out of band and is not guaranteed
    /// idempotent; callers must suppress duplicate submissions themselves.
    pub async fn update_payment(
        &self,
        payment_id: &str,
        decision: ReviewDecision,
    ) -> Result<PaymentActionAck, ClientError> {
        let url = self.base_url.join(&format!(
            "/payments/{}",
            urlencoding::encode(payment_id)
        ))?;

        let resp = self
            .http
            .patch(url)
            .header(API_KEY_HEADER, &self.token)
            .json(&PaymentActionRequest { status: decision })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /bots/{bot_id}/files/{file_id}` – resolve an opaque screenshot
    /// reference into a time-limited displayable URL.
    pub async fn file_url(&self, bot_id: &str, file_id: &str) -> Result<Url, ClientError> {
        let url = self.base_url.join(&format!(
            "/bots/{}/files/{}",
            urlencoding::encode(bot_id),
            urlencoding::encode(file_id)
        ))?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await?;

        let FileUrlResponse { url } = parse_response(resp).await?;
        Ok(url)
    }

    /// `GET /bots/{bot_id}/config` – the full config map for one bot.
    pub async fn all_config(&self, bot_id: &str) -> Result<HashMap<String, String>, ClientError> {
        let url = self
            .base_url
            .join(&format!("/bots/{}/config", urlencoding::encode(bot_id)))?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `GET /bots/{bot_id}/config/{key}` – read one config value.
    pub async fn config(&self, bot_id: &str, key: ConfigKey) -> Result<ConfigEntry, ClientError> {
        let url = self.base_url.join(&format!(
            "/bots/{}/config/{}",
            urlencoding::encode(bot_id),
            key
        ))?;

        let resp = self
            .http
            .get(url)
            .header(API_KEY_HEADER, &self.token)
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `PUT /bots/{bot_id}/config/{key}` – upsert one config value.
    pub async fn set_config(
        &self,
        bot_id: &str,
        key: ConfigKey,
        value: impl Into<String>,
    ) -> Result<ConfigEntry, ClientError> {
        let url = self.base_url.join(&format!(
            "/bots/{}/config/{}",
            urlencoding::encode(bot_id),
            key
        ))?;

        let resp = self
            .http
            .put(url)
            .header(API_KEY_HEADER, &self.token)
            .json(&ConfigUpdate {
                value: value.into(),
            })
            .send()
            .await?;

        parse_response(resp).await
    }

    /// `POST /bots/{bot_id}/upload` – upload an image and get back its
    /// public URL, for the QR/photo config fields.
    pub async fn upload_image(
        &self,
        bot_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<Url, ClientError> {
        let url = self
            .base_url
            .join(&format!("/bots/{}/upload", urlencoding::encode(bot_id)))?;

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_owned());
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .http
            .post(url)
            .header(API_KEY_HEADER, &self.token)
            .multipart(form)
            .send()
            .await?;

        let UploadResponse { url } = parse_response(resp).await?;
        Ok(url)
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api { status, body });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}
