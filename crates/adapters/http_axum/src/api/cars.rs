//! JSON REST handlers for cars.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rust_decimal::Decimal;
use serde::Deserialize;

use carrental_domain::car::{Car, CarType, TransmissionType};
use carrental_domain::id::CarId;

use crate::api::parse_id;
use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Request body for adding or updating a car.
///
/// Status is not accepted from callers; it only moves through reservations.
#[derive(Deserialize)]
pub struct CarRequest {
    pub barcode: String,
    pub license_plate: String,
    pub brand: String,
    pub model: String,
    #[serde(default)]
    pub passenger_capacity: u32,
    #[serde(default)]
    pub mileage: u32,
    pub daily_price: Decimal,
    pub transmission_type: TransmissionType,
    pub car_type: CarType,
}

impl CarRequest {
    fn into_car(self) -> Result<Car, ApiError> {
        Ok(Car::builder()
            .barcode(self.barcode)
            .license_plate(self.license_plate)
            .brand(self.brand)
            .model(self.model)
            .passenger_capacity(self.passenger_capacity)
            .mileage(self.mileage)
            .daily_price(self.daily_price)
            .transmission_type(self.transmission_type)
            .car_type(self.car_type)
            .build()?)
    }
}

/// Query string of the availability search.
#[derive(Deserialize)]
pub struct AvailableQuery {
    pub car_type: CarType,
    pub transmission_type: TransmissionType,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Car>>),
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
    Ok(Json<Car>),
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

/// `GET /api/cars`
pub async fn list<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ListResponse, ApiError> {
    let cars = state.car_service.list_cars().await?;
    Ok(ListResponse::Ok(Json(cars)))
}

/// `GET /api/cars/{id}`
pub async fn get<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError> {
    let car_id: CarId = parse_id(&id)?;
    let car = state.car_service.get_car(car_id).await?;
    Ok(GetResponse::Ok(Json(car)))
}

/// `GET /api/cars/barcode/{barcode}`
pub async fn get_by_barcode<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(barcode): Path<String>,
) -> Result<GetResponse, ApiError> {
    let car = state.car_service.get_car_by_barcode(&barcode).await?;
    Ok(GetResponse::Ok(Json(car)))
}

/// `POST /api/cars`
pub async fn create<R: Repositories>(
    State(state): State<AppState<R>>,
    Json(req): Json<CarRequest>,
) -> Result<GetResponse, ApiError> {
    let car = req.into_car()?;
    let created = state.car_service.add_car(car).await?;
    Ok(GetResponse::Ok(Json(created)))
}

/// `PUT /api/cars/{id}`
pub async fn update<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<CarRequest>,
) -> Result<GetResponse, ApiError> {
    let car_id: CarId = parse_id(&id)?;
    let car = req.into_car()?;
    let updated = state.car_service.update_car(car_id, car).await?;
    Ok(GetResponse::Ok(Json(updated)))
}

/// `DELETE /api/cars/{id}`
pub async fn delete<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError> {
    let car_id: CarId = parse_id(&id)?;
    state.car_service.delete_car(car_id).await?;
    Ok(DeleteResponse::NoContent)
}

/// `DELETE /api/cars/barcode/{barcode}`: `false` when the car is held.
pub async fn delete_by_barcode<R: Repositories>(
    State(state): State<AppState<R>>,
    Path(barcode): Path<String>,
) -> Result<Json<bool>, ApiError> {
    let deleted = state.car_service.delete_car_by_barcode(&barcode).await?;
    Ok(Json(deleted))
}

/// `GET /api/cars/available?car_type=..&transmission_type=..`
pub async fn available<R: Repositories>(
    State(state): State<AppState<R>>,
    Query(query): Query<AvailableQuery>,
) -> Result<ListResponse, ApiError> {
    let cars = state
        .car_service
        .search_available_cars(query.car_type, query.transmission_type)
        .await?;
    Ok(ListResponse::Ok(Json(cars)))
}

/// `GET /api/cars/rented`
///
/// Answers `200` with an empty list when no car is rented, never `404`.
pub async fn rented<R: Repositories>(
    State(state): State<AppState<R>>,
) -> Result<ListResponse, ApiError> {
    let cars = state.car_service.rented_cars().await?;
    Ok(ListResponse::Ok(Json(cars)))
}
