//! # carrental-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `CarRepository`, `MemberRepository`, `LocationRepository`: CRUD and finders
//!   - `EquipmentRepository`, `AdditionalServiceRepository`: extras catalogs
//!   - `ReservationRepository`: lifecycle writes that also move the car's status
//! - Define **driving/inbound ports** as use-case structs:
//!   - `CarService`: fleet CRUD, availability search, rented cars
//!   - `MemberService`, `LocationService`, `EquipmentService`, `AdditionalServiceService`
//!   - `ReservationService`: make, return, cancel, attach extras, delete
//! - Orchestrate domain objects without knowing *how* persistence works
//!
//! ## Dependency rule
//! Depends on `carrental-domain` only.
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod ports;
pub mod services;
