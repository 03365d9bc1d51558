//! Bot roster entries.

use serde::{Deserialize, Serialize};

/// One configured bot instance, as returned by `GET /bots`.
///
/// Read-only context for labeling and grouping payments; the configuration
/// subsystem owns and mutates these records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInfo {
    pub bot_id: String,
    pub username: String,
    pub display_name: Option<String>,
}

impl BotInfo {
    /// Human-readable label: the display name when set, else the username.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.username)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_falls_back_to_username() {
        let named = BotInfo {
            bot_id: "bot1".to_string(),
            username: "premium_bot".to_string(),
            display_name: Some("Premium Bot".to_string()),
        };
        assert_eq!(named.label(), "Premium Bot");

        let unnamed = BotInfo {
            bot_id: "bot2".to_string(),
            username: "other_bot".to_string(),
            display_name: None,
        };
        assert_eq!(unnamed.label(), "other_bot");

        let blank = BotInfo {
            display_name: Some(String::new()),
            ..unnamed
        };
        assert_eq!(blank.label(), "other_bot");
    }
}
