//! Shared application state for axum handlers.

use std::sync::Arc;

use carrental_app::ports::{
    AdditionalServiceRepository, CarRepository, EquipmentRepository, LocationRepository,
    MemberRepository, ReservationRepository,
};
use carrental_app::services::additional_service_service::AdditionalServiceService;
use carrental_app::services::car_service::CarService;
use carrental_app::services::equipment_service::EquipmentService;
use carrental_app::services::location_service::LocationService;
use carrental_app::services::member_service::MemberService;
use carrental_app::services::reservation_service::ReservationService;

/// The set of repository implementations a server is built from.
///
/// Handlers are generic over a single `R: Repositories` instead of one type
/// parameter per port; the storage adapter picks the concrete types once.
pub trait Repositories: Send + Sync + 'static {
    type Cars: CarRepository + Send + Sync + 'static;
    type Members: MemberRepository + Send + Sync + 'static;
    type Locations: LocationRepository + Send + Sync + 'static;
    type Equipment: EquipmentRepository + Send + Sync + 'static;
    type Services: AdditionalServiceRepository + Send + Sync + 'static;
    type Reservations: ReservationRepository + Send + Sync + 'static;
}

/// Reservation service specialised to the repositories of `R`.
pub type Reservations<R> = ReservationService<
    <R as Repositories>::Reservations,
    <R as Repositories>::Cars,
    <R as Repositories>::Members,
    <R as Repositories>::Locations,
    <R as Repositories>::Equipment,
    <R as Repositories>::Services,
>;

/// Application state shared across all axum handlers.
///
/// `Clone` is implemented manually so the repositories themselves do not
/// need to be `Clone`; only the `Arc` wrappers are cloned.
pub struct AppState<R: Repositories> {
    pub car_service: Arc<CarService<R::Cars>>,
    pub member_service: Arc<MemberService<R::Members>>,
    pub location_service: Arc<LocationService<R::Locations>>,
    pub equipment_service: Arc<EquipmentService<R::Equipment>>,
    pub additional_service_service: Arc<AdditionalServiceService<R::Services>>,
    pub reservation_service: Arc<Reservations<R>>,
}

impl<R: Repositories> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            car_service: Arc::clone(&self.car_service),
            member_service: Arc::clone(&self.member_service),
            location_service: Arc::clone(&self.location_service),
            equipment_service: Arc::clone(&self.equipment_service),
            additional_service_service: Arc::clone(&self.additional_service_service),
            reservation_service: Arc::clone(&self.reservation_service),
        }
    }
}

impl<R: Repositories> AppState<R> {
    /// Create a new application state from service instances.
    pub fn new(
        car_service: CarService<R::Cars>,
        member_service: MemberService<R::Members>,
        location_service: LocationService<R::Locations>,
        equipment_service: EquipmentService<R::Equipment>,
        additional_service_service: AdditionalServiceService<R::Services>,
        reservation_service: Reservations<R>,
    ) -> Self {
        Self {
            car_service: Arc::new(car_service),
            member_service: Arc::new(member_service),
            location_service: Arc::new(location_service),
            equipment_service: Arc::new(equipment_service),
            additional_service_service: Arc::new(additional_service_service),
            reservation_service: Arc::new(reservation_service),
        }
    }
}
