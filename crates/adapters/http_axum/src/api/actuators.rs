//! JSON REST handlers for actuators.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthome_app::ports::Storage;
use smarthome_domain::id::{ActuatorId, ActuatorModelName, DeviceId};

use crate::dto::{
    ActuatorResponse, CreateActuatorRequest, OperateRequest, ReadingResponse, ValueResponse,
};
use crate::error::{ApiError, error_response};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ActuatorId>>),
    Empty,
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Empty => error_response(StatusCode::NOT_FOUND, "no actuators found"),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ActuatorResponse>),
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
    Created(Json<ActuatorResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the blind roller endpoints.
pub enum PositionResponse {
    Ok(Json<ReadingResponse>),
}

impl IntoResponse for PositionResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the generic operate endpoint.
pub enum OperateResponse {
    Ok(Json<ValueResponse>),
}

impl IntoResponse for OperateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /actuators/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let actuator = state
        .actuator_service
        .get_actuator(ActuatorId::parse(id)?)
        .await?;
    Ok(GetResponse::Ok(Json(actuator.into())))
}

/// `GET /actuators/device/{device_id}`
pub async fn list_of_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(device_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let actuators = state
        .actuator_service
        .list_actuators_of_device(DeviceId::parse(device_id)?)
        .await?;
    if actuators.is_empty() {
        return Ok(ListResponse::Empty);
    }
    Ok(ListResponse::Ok(Json(
        actuators.into_iter().map(|a| a.id).collect(),
    )))
}

/// `POST /actuators/device/{device_id}`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(device_id): Path<String>,
    Json(req): Json<CreateActuatorRequest>,
) -> Result<CreateResponse, ApiError> {
    let device_id = DeviceId::parse(device_id)?;
    let model = ActuatorModelName::parse(req.model)?;
    let actuator = state
        .actuator_service
        .add_actuator(device_id, model, req.config)
        .await?;
    Ok(CreateResponse::Created(Json(actuator.into())))
}

/// `PUT /actuators/{id}/operate-blind-roller`
pub async fn operate_blind_roller<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<OperateRequest>,
) -> Result<PositionResponse, ApiError> {
    let reading = state
        .actuator_service
        .operate_blind_roller(ActuatorId::parse(id)?, req.value)
        .await?;
    Ok(PositionResponse::Ok(Json(reading.into())))
}

/// `PUT /actuators/{id}/operate`
pub async fn operate<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<OperateRequest>,
) -> Result<OperateResponse, ApiError> {
    let value = state
        .actuator_service
        .operate(ActuatorId::parse(id)?, req.value)
        .await?;
    Ok(OperateResponse::Ok(Json(ValueResponse { value })))
}

/// `GET /actuators/{id}/current-percentage-value`
pub async fn current_percentage<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<PositionResponse, ApiError> {
    let reading = state
        .actuator_service
        .current_percentage(ActuatorId::parse(id)?)
        .await?;
    Ok(PositionResponse::Ok(Json(reading.into())))
}
