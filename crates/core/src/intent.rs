use serde::{Deserialize, Serialize};

/// Closed set of conversational intents this action handles.
///
/// Inbound intent names outside this set are rejected at the webhook adapter
/// instead of falling through silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    /// `tell.tip` — tell a random tip, optionally scoped to a category.
    TellTip,
    /// `tell.latest.tip` — tell the most recently created tip.
    TellLatestTip,
    /// `setup.push` — ask permission to send push notifications.
    SetupPush,
    /// `actions.intent.PERMISSION` — platform reply to the permission prompt.
    Permission,
    /// `actions.intent.REGISTER_UPDATE` — platform reply to update registration.
    RegisterUpdate,
    /// `actions.intent.MAIN` — conversation entry point.
    Main,
    /// `actions.intent.TEXT` — raw user utterance, routed by keyword.
    Text,
}

impl Intent {
    /// Parse a platform intent name. Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tell.tip" => Some(Self::TellTip),
            "tell.latest.tip" => Some(Self::TellLatestTip),
            "setup.push" => Some(Self::SetupPush),
            "actions.intent.PERMISSION" => Some(Self::Permission),
            "actions.intent.REGISTER_UPDATE" => Some(Self::RegisterUpdate),
            "actions.intent.MAIN" => Some(Self::Main),
            "actions.intent.TEXT" => Some(Self::Text),
            _ => None,
        }
    }

    /// Platform intent name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TellTip => "tell.tip",
            Self::TellLatestTip => "tell.latest.tip",
            Self::SetupPush => "setup.push",
            Self::Permission => "actions.intent.PERMISSION",
            Self::RegisterUpdate => "actions.intent.REGISTER_UPDATE",
            Self::Main => "actions.intent.MAIN",
            Self::Text => "actions.intent.TEXT",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_every_known_name() {
        for intent in [
            Intent::TellTip,
            Intent::TellLatestTip,
            Intent::SetupPush,
            Intent::Permission,
            Intent::RegisterUpdate,
            Intent::Main,
            Intent::Text,
        ] {
            assert_eq!(Intent::from_name(intent.as_str()), Some(intent));
        }
    }

    #[test]
    fn rejects_unknown_name() {
        assert_eq!(Intent::from_name("tell.joke"), None);
    }
}
