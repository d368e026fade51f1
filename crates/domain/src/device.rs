//! Device — an inventory record identified by an integer key.

use serde::{Deserialize, Serialize};

use crate::error::{DeviceHubError, ValidationError};
use crate::id::DeviceId;
use crate::time::{self, Timestamp};

/// A device tracked by the inventory.
///
/// `id` is `None` until the device has been persisted. `creation_time` is
/// owned by the storage layer, which re-stamps it on every save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: Option<DeviceId>,
    pub name: String,
    pub brand: String,
    pub creation_time: Timestamp,
}

impl Device {
    /// Create a builder for constructing a [`Device`].
    #[must_use]
    pub fn builder() -> DeviceBuilder {
        DeviceBuilder::default()
    }

    /// The stored id, if any. A zero id counts as unassigned.
    #[must_use]
    pub fn assigned_id(&self) -> Option<DeviceId> {
        self.id.filter(|id| id.get() != 0)
    }

    /// Whether the device carries no identity and no data at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assigned_id().is_none() && self.name.is_empty() && self.brand.is_empty()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] when the device is entirely
    /// zero-valued.
    pub fn validate(&self) -> Result<(), DeviceHubError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyDevice.into());
        }
        Ok(())
    }

    /// Copy every field present in `partial` onto this device.
    pub fn apply(&mut self, partial: PartialDevice) {
        if let Some(name) = partial.name {
            self.name = name;
        }
        if let Some(brand) = partial.brand {
            self.brand = brand;
        }
    }
}

/// Step-by-step builder for [`Device`].
#[derive(Debug, Default)]
pub struct DeviceBuilder {
    id: Option<DeviceId>,
    name: Option<String>,
    brand: Option<String>,
}

impl DeviceBuilder {
    #[must_use]
    pub fn id(mut self, id: DeviceId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Consume the builder, validate, and return a [`Device`].
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] if id, name, and brand are all
    /// missing.
    pub fn build(self) -> Result<Device, DeviceHubError> {
        let device = Device {
            id: self.id,
            name: self.name.unwrap_or_default(),
            brand: self.brand.unwrap_or_default(),
            creation_time: time::now(),
        };
        device.validate()?;
        Ok(device)
    }
}

/// Client-supplied subset of device fields.
///
/// Absent fields are left untouched when merged onto an existing device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialDevice {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl PartialDevice {
    /// Whether no field is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.brand.is_none()
    }

    /// Reject a partial that carries no field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyPartial`] when both fields are absent.
    pub fn validate(&self) -> Result<(), DeviceHubError> {
        if self.is_empty() {
            return Err(ValidationError::EmptyPartial.into());
        }
        Ok(())
    }

    /// Turn the partial into a fresh, unsaved device.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceHubError::Validation`] when the partial is empty.
    pub fn into_device(self) -> Result<Device, DeviceHubError> {
        self.validate()?;
        let mut builder = Device::builder();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(brand) = self.brand {
            builder = builder.brand(brand);
        }
        builder.build()
    }
}
