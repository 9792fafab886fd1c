//! JSON REST handlers for locations.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use carrental_domain::id::LocationId;
use carrental_domain::location::Location;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Request body for adding or updating a location.
#[derive(Deserialize)]
pub struct LocationRequest {
    pub code: String,
    pub name: String,
    pub address: Option<String>,
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Location>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get, create and update endpoints.
pub enum GetResponse {
    Ok(Json<Location>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
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

/// `GET /api/locations`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ListResponse, ApiError> {
    let locations = state.location_service.list_locations().await?;
    Ok(ListResponse::Ok(Json(locations)))
}

/// `GET /api/locations/{id}`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let location_id: LocationId = parse_id(&id)?;
    let location = state.location_service.get_location(location_id).await?;
    Ok(GetResponse::Ok(Json(location)))
}

/// `GET /api/locations/code/{code}`
pub async fn get_by_code<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(code): Path<String>,
) -> Result<GetResponse, ApiError> {
    let location = state.location_service.get_location_by_code(&code).await?;
    Ok(GetResponse::Ok(Json(location)))
}

/// `POST /api/locations`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(req): Json<LocationRequest>,
) -> Result<GetResponse, ApiError> {
    let location = Location::new(req.code, req.name, req.address)?;
    let created = state.location_service.add_location(location).await?;
    Ok(GetResponse::Ok(Json(created)))
}

/// `PUT /api/locations/{id}`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<LocationRequest>,
) -> Result<GetResponse, ApiError> {
    let location_id: LocationId = parse_id(&id)?;
    let location = Location::new(req.code, req.name, req.address)?;
    let updated = state
        .location_service
        .update_location(location_id, location)
        .await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/locations/{id}`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let location_id: LocationId = parse_id(&id)?;
    state.location_service.delete_location(location_id).await?;
    Ok(DeleteResponse::NoContent)
}
