//! # carrental-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve a **JSON REST API** under `/api` for cars, members, locations,
//!   the equipment and additional service catalogs, and reservations
//! - Map request bodies, path segments and query strings into domain values
//! - Map application results into JSON responses, and [`RentalError`]s into
//!   status codes through [`error::ApiError`]
//!
//! ## Dependency rule
//! Depends on `carrental-app` (for port traits and services) and
//! `carrental-domain` (for domain types used in request/response mapping).
//! Never leaks axum types into the domain.
//!
//! [`RentalError`]: carrental_domain::error::RentalError

pub mod api;
pub mod error;
pub mod router;
pub mod state;
