//! JSON REST handlers for the equipment catalog.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use carrental_domain::equipment::Equipment;
use carrental_domain::id::EquipmentId;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Request body for adding or updating equipment.
#[derive(Deserialize)]
pub struct EquipmentRequest {
    pub name: String,
    pub price: Decimal,
}

/// `GET /api/equipments`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<Json<Vec<Equipment>>, ApiError> {
    Ok(Json(state.equipment_service.list_equipment().await?))
}

/// `GET /api/equipments/{id}`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<Json<Equipment>, ApiError> {
    let equipment_id: EquipmentId = parse_id(&id)?;
    Ok(Json(
        state.equipment_service.get_equipment(equipment_id).await?,
    ))
}

/// `POST /api/equipments`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(req): Json<EquipmentRequest>,
) -> Result<Json<Equipment>, ApiError> {
    let equipment = Equipment::new(req.name, req.price)?;
    Ok(Json(state.equipment_service.add_equipment(equipment).await?))
}

/// `PUT /api/equipments/{id}`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<EquipmentRequest>,
) -> Result<Json<Equipment>, ApiError> {
    let equipment_id: EquipmentId = parse_id(&id)?;
    let equipment = Equipment::new(req.name, req.price)?;
    let updated = state
        .equipment_service
        .update_equipment(equipment_id, equipment)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/equipments/{id}`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let equipment_id: EquipmentId = parse_id(&id)?;
    state.equipment_service.delete_equipment(equipment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
