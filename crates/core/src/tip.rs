use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of tip content. Immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub text: String,
    pub url: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

/// Tip content as submitted for creation; `created_at` is stamped by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTip {
    pub text: String,
    pub url: String,
    pub category: String,
}

/// A (user, intent) pair eligible to receive a proactive push.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationTarget {
    pub user_id: String,
    pub intent: String,
}
