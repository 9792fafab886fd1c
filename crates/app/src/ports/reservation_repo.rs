//! Reservation repository port: lifecycle writes that span the car table.
//!
//! Every method that changes a reservation's status also receives the car in
//! its matching state. Implementations must persist both in a single atomic
//! unit of work.

use std::future::Future;

use carrental_domain::car::Car;
use carrental_domain::error::RentalError;
use carrental_domain::id::{AdditionalServiceId, EquipmentId, ReservationId};
use carrental_domain::reservation::{Reservation, ReservationNumber};
use carrental_domain::time::Timestamp;

/// Repository for persisting and querying [`Reservation`]s.
pub trait ReservationRepository {
    /// Insert `reservation` and store `car` (already moved to `RESERVED`).
    ///
    /// The car write must only succeed if the stored car is still
    /// `AVAILABLE`; otherwise nothing is written and a
    /// [`ConflictError::CarUnavailable`](carrental_domain::error::ConflictError::CarUnavailable)
    /// is returned. A member or location removed in the meantime is reported
    /// as not found.
    fn create(
        &self,
        reservation: Reservation,
        car: &Car,
    ) -> impl Future<Output = Result<Reservation, RentalError>> + Send;

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, RentalError>> + Send;

    /// Look up a reservation by its public number.
    fn get_by_number(
        &self,
        number: &ReservationNumber,
    ) -> impl Future<Output = Result<Option<Reservation>, RentalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, RentalError>> + Send;

    /// Reservations created within `[start, end]`, oldest first.
    fn find_created_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reservation>, RentalError>> + Send;

    /// Close an `ACTIVE` reservation and store the car's status with it.
    ///
    /// When the stored reservation is no longer `ACTIVE` nothing is written
    /// and the write is refused with
    /// [`ConflictError::InvalidTransition`](carrental_domain::error::ConflictError::InvalidTransition).
    fn update_status(
        &self,
        reservation: &Reservation,
        car: &Car,
    ) -> impl Future<Output = Result<(), RentalError>> + Send;

    /// Add equipment to the reservation's set. Attaching twice is a no-op.
    fn attach_equipment(
        &self,
        id: ReservationId,
        equipment_id: EquipmentId,
    ) -> impl Future<Output = Result<(), RentalError>> + Send;

    /// Add an additional service to the reservation's set. Attaching twice is a no-op.
    fn attach_service(
        &self,
        id: ReservationId,
        service_id: AdditionalServiceId,
    ) -> impl Future<Output = Result<(), RentalError>> + Send;

    /// Delete a reservation and its attachments. Returns `false` when no row matched.
    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<bool, RentalError>> + Send;
}
