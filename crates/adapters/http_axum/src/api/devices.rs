//! JSON REST handlers for devices.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use devicehub_app::ports::DeviceRepository;
use devicehub_domain::device::{Device, PartialDevice};
use devicehub_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Query parameters accepted by the list endpoint.
///
/// Only the first `brand` pair counts; unknown keys are ignored.
#[derive(Debug, Default)]
pub struct ListParams {
    /// Only return devices of this exact brand.
    pub brand: Option<String>,
}

impl ListParams {
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let brand = pairs
            .into_iter()
            .find_map(|(key, value)| (key == "brand").then_some(value));
        Self { brand }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /device` — list devices, optionally filtered with `?brand=`.
pub async fn list<DR>(
    State(state): State<AppState<DR>>,
    params: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let params = match params {
        Ok(Query(pairs)) => ListParams::from_pairs(pairs),
        Err(rejection) => {
            tracing::debug!(%rejection, "ignoring unparseable query string");
            ListParams::default()
        }
    };
    let devices = state
        .device_service
        .list_devices(params.brand.as_deref())
        .await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /device/{id}`
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    id: Result<Path<DeviceId>, PathRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let device = state.device_service.get_device(id).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /device`
pub async fn create<DR>(
    State(state): State<AppState<DR>>,
    body: Result<Json<PartialDevice>, JsonRejection>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Json(partial) = body?;
    let created = state.device_service.add_device(partial).await?;
    Ok(CreateResponse::Created(Json(created)))
}

/// `PUT /device/{id}` — patch the fields present in the body.
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    id: Result<Path<DeviceId>, PathRejection>,
    body: Result<Json<PartialDevice>, JsonRejection>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    let Json(partial) = body?;
    let updated = state.device_service.update_device(id, partial).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /device/{id}`
pub async fn delete<DR>(
    State(state): State<AppState<DR>>,
    id: Result<Path<DeviceId>, PathRejection>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let Path(id) = id?;
    state.device_service.delete_device(id).await?;
    Ok(DeleteResponse::NoContent)
}
