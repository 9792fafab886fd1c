//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod cars;
#[allow(clippy::missing_errors_doc)]
pub mod equipments;
#[allow(clippy::missing_errors_doc)]
pub mod locations;
#[allow(clippy::missing_errors_doc)]
pub mod members;
#[allow(clippy::missing_errors_doc)]
pub mod reservations;
#[allow(clippy::missing_errors_doc)]
pub mod services;

use std::str::FromStr;

use axum::Router;
use axum::routing::{get, post, put};

use carrental_domain::error::{RentalError, ValidationError};

use crate::error::ApiError;
use crate::state::{AppState, Repositories};

/// Build the `/api` sub-router.
pub fn routes<R: Repositories>() -> Router<AppState<R>> {
    Router::new()
        // Cars
        .route("/cars", get(cars::list::<R>).post(cars::create::<R>))
        .route("/cars/available", get(cars::available::<R>))
        .route("/cars/rented", get(cars::rented::<R>))
        .route(
            "/cars/barcode/{barcode}",
            get(cars::get_by_barcode::<R>).delete(cars::delete_by_barcode::<R>),
        )
        .route(
            "/cars/{id}",
            get(cars::get::<R>)
                .put(cars::update::<R>)
                .delete(cars::delete::<R>),
        )
        // Members
        .route("/members", get(members::list::<R>).post(members::create::<R>))
        .route(
            "/members/{id}",
            get(members::get::<R>)
                .put(members::update::<R>)
                .delete(members::delete::<R>),
        )
        // Locations
        .route(
            "/locations",
            get(locations::list::<R>).post(locations::create::<R>),
        )
        .route("/locations/code/{code}", get(locations::get_by_code::<R>))
        .route(
            "/locations/{id}",
            get(locations::get::<R>)
                .put(locations::update::<R>)
                .delete(locations::delete::<R>),
        )
        // Equipment
        .route(
            "/equipments",
            get(equipments::list::<R>).post(equipments::create::<R>),
        )
        .route(
            "/equipments/{id}",
            get(equipments::get::<R>)
                .put(equipments::update::<R>)
                .delete(equipments::delete::<R>),
        )
        // Additional services
        .route(
            "/services",
            get(services::list::<R>).post(services::create::<R>),
        )
        .route(
            "/services/{id}",
            get(services::get::<R>)
                .put(services::update::<R>)
                .delete(services::delete::<R>),
        )
        // Reservations
        .route(
            "/reservations",
            get(reservations::list::<R>).post(reservations::create::<R>),
        )
        .route("/reservations/between", get(reservations::between::<R>))
        .route(
            "/reservations/{number}",
            get(reservations::get::<R>).delete(reservations::delete::<R>),
        )
        .route(
            "/reservations/{number}/services/{service_id}",
            post(reservations::add_service::<R>),
        )
        .route(
            "/reservations/{number}/equipments/{equipment_id}",
            post(reservations::add_equipment::<R>),
        )
        .route(
            "/reservations/{number}/return",
            put(reservations::return_car::<R>),
        )
        .route(
            "/reservations/{number}/cancel",
            put(reservations::cancel::<R>),
        )
}

/// Parse a typed identifier taken from the request path or body.
pub(crate) fn parse_id<T: FromStr>(raw: &str) -> Result<T, ApiError> {
    T::from_str(raw)
        .map_err(|_| ApiError::from(RentalError::from(ValidationError::InvalidId(raw.to_string()))))
}
