//! JSON REST handlers for devices.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthome_app::ports::Storage;
use smarthome_domain::id::{DeviceId, DeviceTypeName, RoomId};

use crate::dto::{CreateDeviceRequest, DeviceResponse};
use crate::error::{ApiError, error_response};
use crate::state::AppState;

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<DeviceId>>),
    Empty,
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Empty => error_response(StatusCode::NOT_FOUND, "no devices found"),
        }
    }
}

impl From<Vec<DeviceId>> for ListResponse {
    fn from(ids: Vec<DeviceId>) -> Self {
        if ids.is_empty() {
            Self::Empty
        } else {
            Self::Ok(Json(ids))
        }
    }
}

/// Possible responses from the get and deactivate endpoints.
pub enum GetResponse {
    Ok(Json<DeviceResponse>),
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
    Created(Json<DeviceResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /devices`
pub async fn list<S: Storage>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let devices = state.device_service.list_devices().await?;
    Ok(devices.into_iter().map(|d| d.id).collect::<Vec<_>>().into())
}

/// `GET /devices/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let device = state.device_service.get_device(DeviceId::parse(id)?).await?;
    Ok(GetResponse::Ok(Json(device.into())))
}

/// `GET /devices/room/{room_id}`
pub async fn list_of_room<S: Storage>(
    State(state): State<AppState<S>>,
    Path(room_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let devices = state
        .device_service
        .list_devices_of_room(RoomId::parse(room_id)?)
        .await?;
    Ok(devices.into_iter().map(|d| d.id).collect::<Vec<_>>().into())
}

/// `POST /devices/room/{room_id}`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(room_id): Path<String>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError> {
    let room_id = RoomId::parse(room_id)?;
    let device_type = DeviceTypeName::parse(req.device_type)?;
    let device = state
        .device_service
        .add_device(room_id, req.name, device_type)
        .await?;
    Ok(CreateResponse::Created(Json(device.into())))
}

/// `PUT /devices/{id}/deactivate`
pub async fn deactivate<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let device = state
        .device_service
        .deactivate_device(DeviceId::parse(id)?)
        .await?;
    Ok(GetResponse::Ok(Json(device.into())))
}

/// `GET /devices/functionality`
pub async fn by_functionality<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<Json<BTreeMap<String, Vec<DeviceId>>>, ApiError> {
    let groups = state.device_service.devices_by_functionality().await?;
    Ok(Json(groups))
}
