use serde::{Deserialize, Serialize};

/// Per-turn conversation flags, round-tripped through the platform's
/// conversation token. Reset when the platform starts a new conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionState {
    /// The next raw utterance is a category choice for daily updates.
    pub awaiting_category: bool,
}

/// Per-user one-shot latches, round-tripped through the platform's user
/// storage blob. Monotonic: once set they never reset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserState {
    /// The daily-updates suggestion chip has already been shown to this user.
    pub daily_suggestion_asked: bool,
    /// The push-notification suggestion chip has already been shown.
    pub push_suggestion_asked: bool,
}

impl SessionState {
    /// Decode from the platform's conversation token. Malformed or missing
    /// tokens fall back to the default state rather than failing the turn.
    #[must_use]
    pub fn from_token(token: Option<&str>) -> Self {
        decode_or_default(token, "conversation token")
    }

    /// Encode for the outbound conversation token.
    #[must_use]
    pub fn to_token(&self) -> String {
        encode(self)
    }
}

impl UserState {
    /// Decode from the platform's user storage blob.
    #[must_use]
    pub fn from_storage(blob: Option<&str>) -> Self {
        decode_or_default(blob, "user storage")
    }

    /// Encode for the outbound user storage blob.
    #[must_use]
    pub fn to_storage(&self) -> String {
        encode(self)
    }
}

fn decode_or_default<T: Default + for<'de> Deserialize<'de>>(
    blob: Option<&str>,
    what: &str,
) -> T {
    match blob {
        None => T::default(),
        Some(s) if s.is_empty() => T::default(),
        Some(s) => serde_json::from_str(s).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "malformed {what}, resetting state");
            T::default()
        }),
    }
}

fn encode<T: Serialize>(state: &T) -> String {
    // Both state records serialize infallibly (plain bools).
    serde_json::to_string(state).unwrap_or_default()
}
