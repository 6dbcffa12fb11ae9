use thiserror::Error;
use tipline_storage::StorageError;

/// Errors from conversation handlers. Store failures bubble to the webhook
/// adapter, which surfaces a generic failure to the platform.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// The platform omitted an argument a handler requires.
    #[error("missing argument: {0}")]
    MissingArgument(&'static str),
}
