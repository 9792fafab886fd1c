//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod additional_service_repo;
pub mod car_repo;
pub mod equipment_repo;
pub mod location_repo;
pub mod member_repo;
pub mod reservation_repo;

pub use additional_service_repo::AdditionalServiceRepository;
pub use car_repo::CarRepository;
pub use equipment_repo::EquipmentRepository;
pub use location_repo::LocationRepository;
pub use member_repo::MemberRepository;
pub use reservation_repo::ReservationRepository;
