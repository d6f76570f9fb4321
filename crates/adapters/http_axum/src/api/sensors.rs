//! JSON REST handlers for sensors.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthome_app::ports::Storage;
use smarthome_domain::id::{DeviceId, SensorId, SensorModelName};

use crate::dto::{CreateSensorRequest, SensorResponse};
use crate::error::{ApiError, error_response};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<SensorId>>),
    Empty,
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Empty => error_response(StatusCode::NOT_FOUND, "no sensors found"),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<SensorResponse>),
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
    Created(Json<SensorResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /sensors/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let sensor = state.sensor_service.get_sensor(SensorId::parse(id)?).await?;
    Ok(GetResponse::Ok(Json(sensor.into())))
}

/// `GET /sensors/device/{device_id}`
pub async fn list_of_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(device_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let sensors = state
        .sensor_service
        .list_sensors_of_device(DeviceId::parse(device_id)?)
        .await?;
    if sensors.is_empty() {
        return Ok(ListResponse::Empty);
    }
    Ok(ListResponse::Ok(Json(
        sensors.into_iter().map(|s| s.id).collect(),
    )))
}

/// `POST /sensors/device/{device_id}`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(device_id): Path<String>,
    Json(req): Json<CreateSensorRequest>,
) -> Result<CreateResponse, ApiError> {
    let device_id = DeviceId::parse(device_id)?;
    let model = SensorModelName::parse(req.model)?;
    let sensor = state.sensor_service.add_sensor(device_id, model).await?;
    Ok(CreateResponse::Created(Json(sensor.into())))
}
