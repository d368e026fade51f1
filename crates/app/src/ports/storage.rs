//! Storage port — repository trait for device persistence.

use std::future::Future;

use devicehub_domain::device::Device;
use devicehub_domain::error::DeviceHubError;
use devicehub_domain::id::DeviceId;

/// Repository for persisting and querying [`Device`]s.
///
/// Absence is never an error: lookups return `None` or an empty list and
/// deletes report whether a row was removed.
pub trait DeviceRepository {
    /// Get every stored device.
    fn find_all(&self) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send;

    /// Get a device by its identifier.
    fn find_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<Option<Device>, DeviceHubError>> + Send;

    /// Get all devices whose brand matches `brand` exactly.
    fn find_by_brand(
        &self,
        brand: &str,
    ) -> impl Future<Output = Result<Vec<Device>, DeviceHubError>> + Send;

    /// Insert the device when it has no id, otherwise replace the row with
    /// that id. The creation time is re-stamped with the current UTC time.
    ///
    /// Fails with [`ValidationError::EmptyDevice`] for a zero-valued device.
    ///
    /// [`ValidationError::EmptyDevice`]: devicehub_domain::error::ValidationError::EmptyDevice
    fn save(&self, device: Device) -> impl Future<Output = Result<Device, DeviceHubError>> + Send;

    /// Delete a device by id, returning whether a row was removed.
    fn delete_by_id(
        &self,
        id: DeviceId,
    ) -> impl Future<Output = Result<bool, DeviceHubError>> + Send;
}
