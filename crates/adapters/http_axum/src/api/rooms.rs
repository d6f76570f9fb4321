//! JSON REST handlers for rooms.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use smarthome_app::ports::Storage;
use smarthome_domain::id::{HouseId, RoomId};

use crate::dto::{CreateRoomRequest, RoomResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<RoomId>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<RoomResponse>),
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
    Created(Json<RoomResponse>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// `GET /rooms`
pub async fn list<S: Storage>(State(state): State<AppState<S>>) -> Result<ListResponse, ApiError> {
    let rooms = state.room_service.list_rooms().await?;
    Ok(ListResponse::Ok(Json(rooms.into_iter().map(|r| r.id).collect())))
}

/// `GET /rooms/{id}`
pub async fn get<S: Storage>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let room = state.room_service.get_room(RoomId::parse(id)?).await?;
    Ok(GetResponse::Ok(Json(room.into())))
}

/// `GET /rooms/house/{house_id}`
pub async fn list_of_house<S: Storage>(
    State(state): State<AppState<S>>,
    Path(house_id): Path<String>,
) -> Result<ListResponse, ApiError> {
    let rooms = state
        .room_service
        .list_rooms_of_house(HouseId::parse(house_id)?)
        .await?;
    Ok(ListResponse::Ok(Json(rooms.into_iter().map(|r| r.id).collect())))
}

/// `POST /rooms/house/{house_id}`
pub async fn create<S: Storage>(
    State(state): State<AppState<S>>,
    Path(house_id): Path<String>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<CreateResponse, ApiError> {
    let house_id = HouseId::parse(house_id)?;
    let dimensions = req.dimensions()?;
    let room = state
        .room_service
        .add_room(house_id, req.name, req.floor, dimensions)
        .await?;
    Ok(CreateResponse::Created(Json(room.into())))
}
