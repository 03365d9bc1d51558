//! Per-bot key-value configuration entries.

use serde::{Deserialize, Serialize};

/// The fixed set of configuration keys the dashboard edits.
///
/// The backend stores free-form key/value rows; this table enumerates the
/// keys the bot actually reads so callers don't scatter string literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKey {
    WelcomeText,
    WelcomeMediaUrl,
    DemoButtonUrl,
    HowToUseButtonUrl,
    PremiumText,
    PremiumPhotoUrl,
    UpiMessage,
    UpiQrUrl,
    CryptoMessage,
    CryptoQrUrl,
    PaymentConfirmedMessage,
    ExtraAdmins,
}

impl ConfigKey {
    /// Every known key, in dashboard page order.
    pub const ALL: [ConfigKey; 12] = [
        ConfigKey::WelcomeText,
        ConfigKey::WelcomeMediaUrl,
        ConfigKey::DemoButtonUrl,
        ConfigKey::HowToUseButtonUrl,
        ConfigKey::PremiumText,
        ConfigKey::PremiumPhotoUrl,
        ConfigKey::UpiMessage,
        ConfigKey::UpiQrUrl,
        ConfigKey::CryptoMessage,
        ConfigKey::CryptoQrUrl,
        ConfigKey::PaymentConfirmedMessage,
        ConfigKey::ExtraAdmins,
    ];

    /// The wire name of this key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::WelcomeText => "welcome_text",
            ConfigKey::WelcomeMediaUrl => "welcome_media_url",
            ConfigKey::DemoButtonUrl => "demo_button_url",
            ConfigKey::HowToUseButtonUrl => "how_to_use_button_url",
            ConfigKey::PremiumText => "premium_text",
            ConfigKey::PremiumPhotoUrl => "premium_photo_url",
            ConfigKey::UpiMessage => "upi_message",
            ConfigKey::UpiQrUrl => "upi_qr_url",
            ConfigKey::CryptoMessage => "crypto_message",
            ConfigKey::CryptoQrUrl => "crypto_qr_url",
            ConfigKey::PaymentConfirmedMessage => "payment_confirmed_message",
            ConfigKey::ExtraAdmins => "extra_admins",
        }
    }

    /// Look up a key by its wire name.
    pub fn parse(name: &str) -> Option<ConfigKey> {
        Self::ALL.iter().copied().find(|key| key.as_str() == name)
    }
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single config row, as returned by the config endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

/// Request body for `PUT /bots/{bot_id}/config/{key}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigUpdate {
    pub value: String,
}
