//! Typed error enum for the notification dispatcher.

use thiserror::Error;
use tipline_storage::StorageError;

/// Errors from notification dispatch.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Service-account credential exchange failed. Terminal for the current
    /// dispatch attempt — there is no retry.
    #[error("auth error: {0}")]
    Auth(String),

    /// One notification send failed. Per-target only; sibling sends proceed.
    #[error("delivery to {user_id} failed: {message}")]
    Delivery { user_id: String, message: String },

    /// Target lookup failed.
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// HTTP client could not be built (TLS backend failure).
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
