//! App strings and fixed intent wiring shared across crates.

/// Pseudo-category that maps to a random tip.
pub const RANDOM_CATEGORY: &str = "random";
/// Pseudo-category that maps to the latest tip.
pub const RECENT_TIP: &str = "most recent";
/// Keyword that re-renders the category list.
pub const CATEGORIES_KEYWORD: &str = "categories";

/// Suggestion chip offering daily update registration.
pub const DAILY_NOTIFICATION_SUGGESTION: &str = "Register for daily updates";
/// Suggestion chip offering push notification opt-in.
pub const PUSH_NOTIFICATION_SUGGESTION: &str = "Alert me of new tips";

/// Intent that proactive pushes and permission grants are registered against.
pub const UPDATE_INTENT: &str = "tell.latest.tip";
/// Intent that daily update registrations are bound to.
pub const DAILY_UPDATE_INTENT: &str = "tell.tip";
/// Name of the category argument on daily update registrations.
pub const CATEGORY_PARAMETER: &str = "category";

/// Greeting for surfaces without a screen. Keeps the conversation open so the
/// user can answer with a keyword.
pub const MSG_AUDIO_WELCOME: &str = "Hi! Welcome to Tipline! I can offer you tips \
     for building voice actions. To hear the most recent tip, say \"most recent\". \
     To hear a random tip, say \"random\".";

/// Greeting for surfaces with a screen; followed by the category chips.
pub const MSG_WELCOME: &str =
    "Hi! Welcome to Tipline! I can offer you tips for building voice actions.";

/// Shown when the matching tip set is empty. A fallback, never an error.
pub const MSG_NO_TIP: &str =
    "Unfortunately there are no tips to offer at this time. Please check again later.";

/// Prompt above the category suggestion chips.
pub const MSG_SELECT_CATEGORY: &str = "Please select a category";

pub const MSG_PUSH_ACCEPTED: &str = "Ok, I'll start alerting you.";
pub const MSG_PUSH_DECLINED: &str = "Ok, I won't alert you.";
pub const MSG_DAILY_ACCEPTED: &str = "Ok, I'll start giving you daily updates.";
pub const MSG_DAILY_DECLINED: &str = "Ok, I won't give you daily updates.";

/// Title of the proactive push sent when new tip content appears.
pub const NOTIFICATION_TITLE: &str = "Tipline has a new tip";
