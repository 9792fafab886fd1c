//! # carrental-domain
//!
//! Pure domain model for the car-rental backend.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Cars** (fleet vehicles with an availability status)
//! - Define **Members** (customers, unique by driving license)
//! - Define **Locations** (pick-up / drop-off branches, unique by code)
//! - Define **Equipment** and **Additional services** (priced extras)
//! - Define **Reservations** and their status machine
//! - Contain all invariant enforcement and transition guards
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod additional_service;
pub mod car;
pub mod equipment;
pub mod location;
pub mod member;
pub mod reservation;
