//! Async store traits for tips and notification registrations.

use async_trait::async_trait;
use tipline_core::{NewTip, NotificationTarget, Tip};

use crate::error::StorageError;
use crate::seed::SeedTip;

/// Tip content operations.
#[async_trait]
pub trait TipStore: Send + Sync {
    /// Pick one tip uniformly at random among tips matching `category`
    /// (all tips when `None`). Returns `Ok(None)` for an empty matching set —
    /// the caller renders a fallback message, never an error.
    async fn random_tip(&self, category: Option<&str>) -> Result<Option<Tip>, StorageError>;

    /// The tip with the maximum creation timestamp, or `None` when empty.
    async fn latest_tip(&self) -> Result<Option<Tip>, StorageError>;

    /// Distinct category values across all tips. Order-insensitive.
    async fn categories(&self) -> Result<Vec<String>, StorageError>;

    /// Insert a new tip stamped with the current time.
    async fn add_tip(&self, tip: NewTip) -> Result<Tip, StorageError>;

    /// Destructive reset: delete every tip, then bulk-insert `seed`.
    /// Returns the number of seeded tips. No cross-invocation mutual
    /// exclusion — a concurrent read may observe an empty or partially
    /// seeded collection.
    async fn restore(&self, seed: &[SeedTip]) -> Result<usize, StorageError>;
}

/// Notification registration operations.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Register a user for proactive updates on `intent`. Deduplicated by
    /// (user, intent): returns `true` if a new registration was created,
    /// `false` if one already existed.
    async fn register_for_update(
        &self,
        user_id: &str,
        intent: &str,
    ) -> Result<bool, StorageError>;

    /// Every registration target whose intent matches, unpaginated.
    async fn registered_targets(
        &self,
        intent: &str,
    ) -> Result<Vec<NotificationTarget>, StorageError>;
}
