//! Storage-specific error type wrapping sqlx errors.

use devicehub_domain::error::DeviceHubError;

/// Errors originating from the `SQLite` storage layer.
///
/// Display is transparent so the engine's own message reaches the caller.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for DeviceHubError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
