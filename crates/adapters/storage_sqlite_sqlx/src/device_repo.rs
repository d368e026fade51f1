//! `SQLite` implementation of [`DeviceRepository`].

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use devicehub_app::ports::DeviceRepository;
use devicehub_domain::device::Device;
use devicehub_domain::error::DeviceHubError;
use devicehub_domain::id::DeviceId;
use devicehub_domain::time;

use crate::error::StorageError;

/// Wrapper for converting database rows into domain [`Device`].
struct Wrapper(Device);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Device> {
        value.map(|w| w.0)
    }

    fn many(values: Vec<Self>) -> Vec<Device> {
        values.into_iter().map(|w| w.0).collect()
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let brand: String = row.try_get("brand")?;
        let creation_time: String = row.try_get("creation_time")?;

        let creation_time = chrono::DateTime::parse_from_rfc3339(&creation_time)
            .map_err(|err| sqlx::Error::Decode(Box::new(err)))?
            .to_utc();

        Ok(Self(Device {
            id: Some(DeviceId::new(id)),
            name,
            brand,
            creation_time,
        }))
    }
}

const INSERT: &str = "INSERT INTO devices (name, brand, creation_time) VALUES (?, ?, ?)";
const UPSERT: &str = r"
    INSERT INTO devices (id, name, brand, creation_time)
    VALUES (?, ?, ?, ?)
    ON CONFLICT (id) DO UPDATE SET
        name = excluded.name,
        brand = excluded.brand,
        creation_time = excluded.creation_time
";
const SELECT_ALL: &str = "SELECT * FROM devices ORDER BY id";
const SELECT_BY_ID: &str = "SELECT * FROM devices WHERE id = ?";
const SELECT_BY_BRAND: &str = "SELECT * FROM devices WHERE brand = ? ORDER BY id";
const DELETE_BY_ID: &str = "DELETE FROM devices WHERE id = ?";

/// `SQLite`-backed device repository.
pub struct SqliteDeviceRepository {
    pool: SqlitePool,
}

impl SqliteDeviceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl DeviceRepository for SqliteDeviceRepository {
    async fn find_all(&self) -> Result<Vec<Device>, DeviceHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn find_by_id(&self, id: DeviceId) -> Result<Option<Device>, DeviceHubError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<Device>, DeviceHubError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_BY_BRAND)
            .bind(brand)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::many(rows))
    }

    async fn save(&self, mut device: Device) -> Result<Device, DeviceHubError> {
        device.validate()?;
        device.creation_time = time::now();
        let stamp = device.creation_time.to_rfc3339();

        match device.assigned_id() {
            Some(id) => {
                sqlx::query(UPSERT)
                    .bind(id.get())
                    .bind(&device.name)
                    .bind(&device.brand)
                    .bind(&stamp)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
            }
            None => {
                let result = sqlx::query(INSERT)
                    .bind(&device.name)
                    .bind(&device.brand)
                    .bind(&stamp)
                    .execute(&self.pool)
                    .await
                    .map_err(StorageError::from)?;
                device.id = Some(DeviceId::new(result.last_insert_rowid()));
            }
        }

        Ok(device)
    }

    async fn delete_by_id(&self, id: DeviceId) -> Result<bool, DeviceHubError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected() > 0)
    }
}
