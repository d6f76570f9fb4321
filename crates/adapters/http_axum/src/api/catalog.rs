//! JSON REST handlers for the read-only catalog.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use smarthome_app::ports::Storage;
use smarthome_domain::catalog::{ActuatorModel, ActuatorType, DeviceType, SensorModel, SensorType};
use smarthome_domain::id::{
    ActuatorModelName, ActuatorTypeName, DeviceTypeName, SensorModelName, SensorTypeId,
};

use crate::error::{ApiError, error_response};
use crate::state::AppState;

/// A catalog listing; answers 404 when it has no entry.
pub enum ListResponse<T> {
    Ok(Json<Vec<T>>),
    Empty(&'static str),
}

impl<T> From<(Vec<T>, &'static str)> for ListResponse<T> {
    fn from((entries, what): (Vec<T>, &'static str)) -> Self {
        if entries.is_empty() {
            Self::Empty(what)
        } else {
            Self::Ok(Json(entries))
        }
    }
}

impl<T: Serialize> IntoResponse for ListResponse<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Empty(what) => error_response(StatusCode::NOT_FOUND, format!("no {what} found")),
        }
    }
}

/// `GET /devicetypes`
pub async fn list_device_types<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<ListResponse<DeviceType>, ApiError> {
    let entries = state.catalog_service.list_device_types().await?;
    Ok((entries, "device types").into())
}

/// `GET /devicetypes/{name}`
pub async fn get_device_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<DeviceType>, ApiError> {
    let entry = state
        .catalog_service
        .get_device_type(DeviceTypeName::parse(name)?)
        .await?;
    Ok(Json(entry))
}

/// `GET /sensortypes`
pub async fn list_sensor_types<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<ListResponse<SensorType>, ApiError> {
    let entries = state.catalog_service.list_sensor_types().await?;
    Ok((entries, "sensor types").into())
}

/// `GET /sensortypes/{id}`
pub async fn get_sensor_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<Json<SensorType>, ApiError> {
    let entry = state
        .catalog_service
        .get_sensor_type(SensorTypeId::parse(id)?)
        .await?;
    Ok(Json(entry))
}

/// `GET /sensormodels/{name}`
pub async fn get_sensor_model<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<SensorModel>, ApiError> {
    let entry = state
        .catalog_service
        .get_sensor_model(SensorModelName::parse(name)?)
        .await?;
    Ok(Json(entry))
}

/// `GET /sensormodels/type/{sensor_type}`
pub async fn sensor_models_of_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(sensor_type): Path<String>,
) -> Result<ListResponse<SensorModel>, ApiError> {
    let entries = state
        .catalog_service
        .sensor_models_of_type(SensorTypeId::parse(sensor_type)?)
        .await?;
    Ok((entries, "sensor models").into())
}

/// `GET /actuatortypes`
pub async fn list_actuator_types<S: Storage>(
    State(state): State<AppState<S>>,
) -> Result<ListResponse<ActuatorType>, ApiError> {
    let entries = state.catalog_service.list_actuator_types().await?;
    Ok((entries, "actuator types").into())
}

/// `GET /actuatortypes/{name}`
pub async fn get_actuator_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<ActuatorType>, ApiError> {
    let entry = state
        .catalog_service
        .get_actuator_type(ActuatorTypeName::parse(name)?)
        .await?;
    Ok(Json(entry))
}

/// `GET /actuatormodels/{name}`
pub async fn get_actuator_model<S: Storage>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<ActuatorModel>, ApiError> {
    let entry = state
        .catalog_service
        .get_actuator_model(ActuatorModelName::parse(name)?)
        .await?;
    Ok(Json(entry))
}

/// `GET /actuatormodels/type/{actuator_type}`
pub async fn actuator_models_of_type<S: Storage>(
    State(state): State<AppState<S>>,
    Path(actuator_type): Path<String>,
) -> Result<ListResponse<ActuatorModel>, ApiError> {
    let entries = state
        .catalog_service
        .actuator_models_of_type(ActuatorTypeName::parse(actuator_type)?)
        .await?;
    Ok((entries, "actuator models").into())
}
