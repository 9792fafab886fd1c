//! JSON REST handlers for the additional service catalog.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use carrental_domain::additional_service::AdditionalService;
use carrental_domain::id::AdditionalServiceId;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Request body for adding or updating an additional service.
#[derive(Deserialize)]
pub struct ServiceRequest {
    pub name: String,
    pub price: Decimal,
}

/// `GET /api/services`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<AdditionalService>>, ApiError> {
    Ok(Json(state.additional_service_service.list_services().await?))
}

/// `GET /api/services/{id}`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<AdditionalService>, ApiError> {
    let service_id: AdditionalServiceId = parse_id(&id)?;
    Ok(Json(
        state
            .additional_service_service
            .get_service(service_id)
            .await?,
    ))
}

/// `POST /api/services`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<AdditionalService>, ApiError> {
    let service = AdditionalService::new(req.name, req.price)?;
    Ok(Json(
        state.additional_service_service.add_service(service).await?,
    ))
}

/// `PUT /api/services/{id}`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<ServiceRequest>,
) -> Result<Json<AdditionalService>, ApiError> {
    let service_id: AdditionalServiceId = parse_id(&id)?;
    let service = AdditionalService::new(req.name, req.price)?;
    let updated = state
        .additional_service_service
        .update_service(service_id, service)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/services/{id}`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let service_id: AdditionalServiceId = parse_id(&id)?;
    state
        .additional_service_service
        .delete_service(service_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
