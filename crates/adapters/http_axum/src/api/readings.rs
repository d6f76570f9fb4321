//! JSON REST handlers for readings and the analyses built on them.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthome_app::ports::Storage;
use smarthome_domain::id::{DeviceId, ReadingId, SensorId};
use smarthome_domain::period::Period;
use smarthome_domain::error::ValidationError;
use smarthome_domain::time::{Timestamp, now, parse_timestamp};

use crate::dto::{CreateReadingRequest, PeakQuery, PeriodQuery, ReadingResponse, ValueResponse};
use crate::error::{ApiError, error_response};
use crate::state::AppState;

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<ReadingResponse>),
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
    Created(Json<ReadingResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the readings-of-device endpoint.
pub enum ListResponse {
    Ok(Json<Vec<ReadingId>>),
    Empty,
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Empty => error_response(StatusCode::NOT_FOUND, "no readings in period"),
        }
    }
}

/// Possible responses from the temperature comparison endpoint.
pub enum DifferenceResponse {
    Ok(Json<ValueResponse>),
    /// No pair of readings close enough in time.
    Unavailable,
}

impl IntoResponse for DifferenceResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Unavailable => error_response(
                StatusCode::BAD_REQUEST,
                "no comparable temperature readings in period",
            ),
        }
    }
}

/// Possible responses from the peak power consumption endpoint.
pub enum PeakResponse {
    Ok(Json<ValueResponse>),
    /// A bound is not an RFC 3339 timestamp.
    Malformed(String),
    /// No consumption recorded, or the period is reversed or in the future.
    NoConsumption,
}

impl IntoResponse for PeakResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Malformed(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::NoConsumption => {
                error_response(StatusCode::NOT_FOUND, "no power consumption in period")
            }
        }
    }
}

/// `POST /readings/sensor/{sensor_id}`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(sensor_id): Path<String>,
    Json(req): Json<CreateReadingRequest>,
) -> Result<CreateResponse, ApiError> {
    let sensor_id = SensorId::parse(sensor_id)?;
    let recorded_at = req.recorded_at.as_deref().map(parse_timestamp).transpose()?;
    let reading = state
        .reading_service
        .add_reading(sensor_id, req.value, recorded_at)
        .await?;
    Ok(CreateResponse::Created(Json(reading.into())))
}

/// `GET /readings/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let reading = state.reading_service.get_reading(ReadingId::parse(id)?).await?;
    Ok(GetResponse::Ok(Json(reading.into())))
}

/// `GET /readings/device/{id}?startPeriod=&endPeriod=`
pub async fn list_of_device<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Query(query): Query<PeriodQuery>,
) -> Result<ListResponse, ApiError> {
    let device_id = DeviceId::parse(id)?;
    let period = Period::parse(&query.start_period, &query.end_period, now())?;
    let ids = state
        .reading_service
        .readings_of_device(device_id, period)
        .await?;
    if ids.is_empty() {
        return Ok(ListResponse::Empty);
    }
    Ok(ListResponse::Ok(Json(ids)))
}

/// `GET /readings/device/{left}/max-temperature-difference/{right}?startPeriod=&endPeriod=`
pub async fn max_temperature_difference<S: Storage>(
    State(state): State<AppState<S>>,
    Path((left, right)): Path<(String, String)>,
    Query(query): Query<PeriodQuery>,
) -> Result<DifferenceResponse, ApiError> {
    let left = DeviceId::parse(left)?;
    let right = DeviceId::parse(right)?;
    let period = Period::parse(&query.start_period, &query.end_period, now())?;
    let difference = state
        .reading_service
        .max_temperature_difference(left, right, period)
        .await?;
    Ok(match difference {
        Some(value) => DifferenceResponse::Ok(Json(ValueResponse { value })),
        None => DifferenceResponse::Unavailable,
    })
}

/// `GET /readings/peak-power-consumption?start=&end=`
pub async fn peak_power_consumption<S: Storage>(
    State(state): State<AppState<S>>,
    Query(query): Query<PeakQuery>,
) -> Result<PeakResponse, ApiError> {
    let (start, end) = match parse_bounds(&query.start, &query.end) {
        Ok(bounds) => bounds,
        Err(err) => return Ok(PeakResponse::Malformed(err.to_string())),
    };
    let Ok(period) = Period::new(start, end, now()) else {
        return Ok(PeakResponse::NoConsumption);
    };
    let peak = state.reading_service.peak_power_consumption(period).await?;
    Ok(match peak {
        Some(value) => PeakResponse::Ok(Json(ValueResponse { value })),
        None => PeakResponse::NoConsumption,
    })
}

fn parse_bounds(start: &str, end: &str) -> Result<(Timestamp, Timestamp), ValidationError> {
    Ok((parse_timestamp(start)?, parse_timestamp(end)?))
}
