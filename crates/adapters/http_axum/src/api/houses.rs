//! JSON REST handlers for houses.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthome_app::ports::Storage;
use smarthome_domain::house::{Country, Location};
use smarthome_domain::id::HouseId;

use crate::dto::{CreateHouseRequest, HouseResponse, LocationRequest};
use crate::error::{ApiError, error_response};
use crate::state::AppState;

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<HouseId>>),
    Empty,
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
            Self::Empty => error_response(StatusCode::NOT_FOUND, "no houses registered"),
        }
    }
}

/// Possible responses from the get and update endpoints.
pub enum GetResponse {
    Ok(Json<HouseResponse>),
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
    Created(Json<HouseResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /houses/countries`
pub async fn countries() -> Json<Vec<&'static str>> {
    Json(Country::available())
}

/// `GET /houses`
pub async fn list<S: Storage>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let houses = state.house_service.list_houses().await?;
    if houses.is_empty() {
        return Ok(ListResponse::Empty);
    }
    Ok(ListResponse::Ok(Json(
        houses.into_iter().map(|house| house.id).collect(),
    )))
}

/// `GET /houses/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let house = state.house_service.get_house(HouseId::parse(id)?).await?;
    Ok(GetResponse::Ok(Json(house.into())))
}

/// `POST /houses`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreateHouseRequest>,
) -> Result<CreateResponse, ApiError> {
    let id = HouseId::parse(req.name)?;
    let location = Location::try_from(req.location)?;
    let house = state.house_service.create_house(id, location).await?;
    Ok(CreateResponse::Created(Json(house.into())))
}

/// `PUT /houses/{id}/location`
pub async fn configure_location<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
    Json(req): Json<LocationRequest>,
) -> Result<GetResponse, ApiError> {
    let id = HouseId::parse(id)?;
    let location = Location::try_from(req)?;
    let house = state.house_service.configure_location(id, location).await?;
    Ok(GetResponse::Ok(Json(house.into())))
}
