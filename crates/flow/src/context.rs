use tipline_core::{Intent, SessionState, UserState};

/// Everything a handler may read or update for one conversation turn.
///
/// State is passed in and out explicitly; nothing here is shared across
/// invocations. The adapter persists `session`/`user` back into the
/// platform envelope after the handler runs.
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// Platform user identifier.
    pub user_id: String,
    /// Whether the output surface can render cards and chips.
    pub has_screen: bool,
    /// Per-turn conversation flags.
    pub session: SessionState,
    /// Per-user one-shot latches.
    pub user: UserState,
}

impl TurnContext {
    #[must_use]
    pub fn new(user_id: String, has_screen: bool) -> Self {
        Self {
            user_id,
            has_screen,
            session: SessionState::default(),
            user: UserState::default(),
        }
    }
}

/// The parsed pieces of one inbound request a handler can act on.
#[derive(Debug, Clone)]
pub struct TurnRequest {
    pub intent: Intent,
    /// Raw user utterance (free-text turns).
    pub raw_input: Option<String>,
    /// Category argument (random-tip turns).
    pub category: Option<String>,
    /// Whether the user granted the notification permission.
    pub permission_granted: Option<bool>,
    /// Stable user id for proactive updates, supplied on permission grants.
    pub updates_user_id: Option<String>,
    /// Status of a daily-update registration ("OK" on success).
    pub update_status: Option<String>,
}

impl TurnRequest {
    /// A bare request carrying only the intent.
    #[must_use]
    pub fn for_intent(intent: Intent) -> Self {
        Self {
            intent,
            raw_input: None,
            category: None,
            permission_granted: None,
            updates_user_id: None,
            update_status: None,
        }
    }
}
