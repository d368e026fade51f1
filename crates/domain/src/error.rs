//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`DeviceHubError`] via `From`. Adapters box their error into the
//! [`DeviceHubError::Storage`] variant so the domain never depends on them.

/// Top-level error returned by services and ports.
#[derive(Debug, thiserror::Error)]
pub enum DeviceHubError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// Opaque failure from a persistence adapter.
    #[error(transparent)]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A partial update carried none of the expected fields.
    #[error("request does not contain any expected fields")]
    EmptyPartial,

    /// Refusing to persist a device with no id, name, or brand.
    #[error("cannot process empty device")]
    EmptyDevice,
}

/// Lookup of a record that does not exist.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{entity} with ID {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}
