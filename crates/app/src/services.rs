//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod additional_service_service;
pub mod car_service;
pub mod equipment_service;
pub mod location_service;
pub mod member_service;
pub mod reservation_service;

#[cfg(test)]
pub(crate) mod in_memory;
