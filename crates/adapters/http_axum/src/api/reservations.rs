//! JSON REST handlers for reservations.
//!
//! Reservations are addressed by their reservation number, never by their
//! internal id. Lifecycle endpoints answer a bare JSON `true` on success.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use chrono::NaiveDateTime;
use serde::Deserialize;

use carrental_app::services::reservation_service::NewReservation;
use carrental_domain::id::{AdditionalServiceId, EquipmentId, MemberId};
use carrental_domain::reservation::{Reservation, ReservationNumber};
use carrental_domain::time::Timestamp;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Request body for making a reservation.
#[derive(Deserialize)]
pub struct CreateReservationRequest {
    pub car_barcode: String,
    pub member_id: String,
    pub pick_up_location_code: String,
    pub drop_off_location_code: String,
    pub day_count: u32,
    pub pick_up_at: Option<Timestamp>,
}

/// Query string of the creation-date range search.
///
/// Bounds are local date-times without offset and are read as UTC.
#[derive(Deserialize)]
pub struct BetweenQuery {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Reservation>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get and create endpoints.
pub enum GetResponse {
    Ok(Json<Reservation>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// `GET /api/reservations`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ListResponse, ApiError> {
    let reservations = state.reservation_service.list_reservations().await?;
    Ok(ListResponse::Ok(Json(reservations)))
}

/// `GET /api/reservations/{number}`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(number): Path<String>,
) -> Result<GetResponse, ApiError> {
    let number = ReservationNumber::from(number);
    let reservation = state.reservation_service.get_reservation(&number).await?;
    Ok(GetResponse::Ok(Json(reservation)))
}

/// `POST /api/reservations`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(req): Json<CreateReservationRequest>,
) -> Result<GetResponse, ApiError> {
    let member_id: MemberId = parse_id(&req.member_id)?;
    let request = NewReservation {
        car_barcode: req.car_barcode,
        member_id,
        pick_up_location_code: req.pick_up_location_code,
        drop_off_location_code: req.drop_off_location_code,
        day_count: req.day_count,
        pick_up_at: req.pick_up_at,
    };
    let reservation = state.reservation_service.make_reservation(request).await?;
    Ok(GetResponse::Ok(Json(reservation)))
}

/// `GET /api/reservations/between?start_date=..&end_date=..`
pub async fn between<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<BetweenQuery>,
) -> Result<ListResponse, ApiError> {
    let reservations = state
        .reservation_service
        .reservations_between(query.start_date.and_utc(), query.end_date.and_utc())
        .await?;
    Ok(ListResponse::Ok(Json(reservations)))
}

/// `POST /api/reservations/{number}/services/{service_id}`
pub async fn add_service<R: Repositories>(
    State(state): State<AppState<R>>,
    Path((number, service_id)): Path<(String, String)>,
) -> Result<Json<bool>, ApiError> {
    let service_id: AdditionalServiceId = parse_id(&service_id)?;
    let added = state
        .reservation_service
        .add_service(&ReservationNumber::from(number), service_id)
        .await?;
    Ok(Json(added))
}

/// `POST /api/reservations/{number}/equipments/{equipment_id}`
pub async fn add_equipment<R: Repositories>(
    State(state): State<AppState<R>>,
    Path((number, equipment_id)): Path<(String, String)>,
) -> Result<Json<bool>, ApiError> {
    let equipment_id: EquipmentId = parse_id(&equipment_id)?;
    let added = state
        .reservation_service
        .add_equipment(&ReservationNumber::from(number), equipment_id)
        .await?;
    Ok(Json(added))
}

/// `PUT /api/reservations/{number}/return`
pub async fn return_car<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(number): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let returned = state
        .reservation_service
        .return_car(&ReservationNumber::from(number))
        .await?;
    Ok(Json(returned))
}

/// `PUT /api/reservations/{number}/cancel`
pub async fn cancel<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(number): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let cancelled = state
        .reservation_service
        .cancel_reservation(&ReservationNumber::from(number))
        .await?;
    Ok(Json(cancelled))
}

/// `DELETE /api/reservations/{number}`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(number): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let deleted = state
        .reservation_service
        .delete_reservation(&ReservationNumber::from(number))
        .await?;
    Ok(Json(deleted))
}
