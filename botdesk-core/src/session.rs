//! Operator session state.
//!
//! The session owns the authenticated client, the bot roster and the
//! selected bot id. It is created on login (or resumed from a cached
//! token), passed explicitly to everything that calls the backend, and
//! dropped on logout. Nothing reads ambient storage; persisting the token
//! and the remembered selection between runs is the embedder's job.

use botdesk_sdk::client::{ClientError, DashboardClient};
use botdesk_sdk::objects::BotInfo;
use tracing::info;
use url::Url;

pub struct Session {
    client: DashboardClient,
    bots: Vec<BotInfo>,
    selected_bot: Option<String>,
}

impl Session {
    /// Authenticate with the operator password and start a session.
    pub async fn login(base_url: Url, password: &str) -> Result<Self, ClientError> {
        let client = DashboardClient::login(base_url, password).await?;
        info!("operator session started");
        Ok(Self {
            client,
            bots: Vec::new(),
            selected_bot: None,
        })
    }

    /// Start a session from a cached token without re-authenticating.
    ///
    /// The token is only validated by the first backend call; an expired
    /// one surfaces as an unauthorized [`ClientError`] there.
    pub fn resume(
        base_url: Url,
        token: impl Into<String>,
        remembered_bot: Option<String>,
    ) -> Self {
        Self {
            client: DashboardClient::new(base_url, token),
            bots: Vec::new(),
            selected_bot: remembered_bot,
        }
    }

    /// The authenticated client; every remote call goes through this.
    pub fn client(&self) -> &DashboardClient {
        &self.client
    }

    /// The opaque credential, for the embedder to cache across restarts.
    pub fn token(&self) -> &str {
        self.client.token()
    }

    /// Fetch the bot roster and reconcile the selection against it.
    pub async fn load_bots(&mut self) -> Result<&[BotInfo], ClientError> {
        let bots = self.client.list_bots().await?;
        self.selected_bot = reconcile_selection(&bots, self.selected_bot.as_deref());
        self.bots = bots;
        Ok(&self.bots)
    }

    /// The roster from the last successful [`load_bots`](Session::load_bots).
    pub fn bots(&self) -> &[BotInfo] {
        &self.bots
    }

    pub fn selected_bot(&self) -> Option<&str> {
        self.selected_bot.as_deref()
    }

    /// Switch to another bot from the roster. Ids not in the roster are
    /// ignored and leave the selection unchanged.
    pub fn select_bot(&mut self, bot_id: &str) -> bool {
        if self.bots.iter().any(|b| b.bot_id == bot_id) {
            self.selected_bot = Some(bot_id.to_owned());
            true
        } else {
            false
        }
    }

    /// End the session, dropping the credential.
    pub fn logout(self) {
        info!("operator session ended");
    }
}

/// A remembered selection survives a roster reload only if it is still
/// present; otherwise fall back to the first bot.
fn reconcile_selection(bots: &[BotInfo], remembered: Option<&str>) -> Option<String> {
    remembered
        .filter(|id| bots.iter().any(|b| b.bot_id == *id))
        .map(str::to_owned)
        .or_else(|| bots.first().map(|b| b.bot_id.clone()))
}
