//! Device service — use-cases for managing devices.

use devicehub_domain::device::{Device, PartialDevice};
use devicehub_domain::error::{DeviceHubError, NotFoundError};
use devicehub_domain::id::DeviceId;

use crate::ports::DeviceRepository;

/// Application service for device CRUD operations.
pub struct DeviceService<R> {
    repo: R,
}

impl<R: DeviceRepository> DeviceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Create a new device from the fields present in `partial`.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] if the partial carries no
    /// field, or a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn add_device(&self, partial: PartialDevice) -> Result<Device, DeviceHubError> {
        let device = partial.into_device()?;
        self.repo.save(device).await
    }

    /// List devices, restricted to `brand` when a filter is given.
    ///
    /// An empty brand is still a filter and matches nothing stored with a
    /// non-empty brand.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn list_devices(&self, brand: Option<&str>) -> Result<Vec<Device>, DeviceHubError> {
        match brand {
            Some(brand) => self.repo.find_by_brand(brand).await,
            None => self.repo.find_all().await,
        }
    }

    /// Look up a device by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_device(&self, id: DeviceId) -> Result<Device, DeviceHubError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    /// Merge the fields present in `partial` onto the stored device.
    ///
    /// The save re-stamps the creation time.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] if the partial carries no
    /// field, [`DeviceHubError::NotFound`] when no device with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn update_device(
        &self,
        id: DeviceId,
        partial: PartialDevice,
    ) -> Result<Device, DeviceHubError> {
        partial.validate()?;
        let mut device = self.get_device(id).await?;
        device.apply(partial);
        self.repo.save(device).await
    }

    /// Delete a device by id.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::NotFound`] when nothing was deleted, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn delete_device(&self, id: DeviceId) -> Result<(), DeviceHubError> {
        if self.repo.delete_by_id(id).await? {
            Ok(())
        } else {
            Err(not_found(id))
        }
    }
}

fn not_found(id: DeviceId) -> DeviceHubError {
    NotFoundError {
        entity: "Device",
        id: id.to_string(),
    }
    .into()
}
