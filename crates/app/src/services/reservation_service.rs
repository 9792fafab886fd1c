//! Reservation service: the rental lifecycle.
//!
//! Making, returning and cancelling a reservation each move a car's status as
//! well. The domain guards both state machines; the repository persists the
//! reservation and the car in one unit of work.

use carrental_domain::car::Car;
use carrental_domain::error::{NotFoundError, RentalError, ValidationError};
use carrental_domain::id::{AdditionalServiceId, EquipmentId, MemberId};
use carrental_domain::location::Location;
use carrental_domain::reservation::{Reservation, ReservationNumber};
use carrental_domain::time::{Timestamp, now};

use crate::ports::{
    AdditionalServiceRepository, CarRepository, EquipmentRepository, LocationRepository,
    MemberRepository, ReservationRepository,
};

/// Everything a caller supplies to make a reservation.
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub car_barcode: String,
    pub member_id: MemberId,
    pub pick_up_location_code: String,
    pub drop_off_location_code: String,
    pub day_count: u32,
    /// Defaults to the time of the call.
    pub pick_up_at: Option<Timestamp>,
}

/// Application service for the reservation lifecycle.
pub struct ReservationService<RR, CR, MR, LR, ER, SR> {
    reservations: RR,
    cars: CR,
    members: MR,
    locations: LR,
    equipment: ER,
    services: SR,
}

impl<RR, CR, MR, LR, ER, SR> ReservationService<RR, CR, MR, LR, ER, SR>
where
    RR: ReservationRepository,
    CR: CarRepository,
    MR: MemberRepository,
    LR: LocationRepository,
    ER: EquipmentRepository,
    SR: AdditionalServiceRepository,
{
    /// Create a new service backed by the given repositories.
    pub fn new(
        reservations: RR,
        cars: CR,
        members: MR,
        locations: LR,
        equipment: ER,
        services: SR,
    ) -> Self {
        Self {
            reservations,
            cars,
            members,
            locations,
            equipment,
            services,
        }
    }

    /// Reserve an available car for a member.
    ///
    /// The reservation is activated straight away and the car moves to
    /// `RESERVED`; both are stored together.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `day_count` is zero,
    /// [`RentalError::NotFound`] when the car, member or a location is
    /// absent, or [`RentalError::Conflict`] when the car is not available
    /// (including when another reservation takes it concurrently).
    #[tracing::instrument(skip(self, request), fields(barcode = %request.car_barcode))]
    pub async fn make_reservation(
        &self,
        request: NewReservation,
    ) -> Result<Reservation, RentalError> {
        if request.day_count == 0 {
            return Err(ValidationError::InvalidDayCount.into());
        }

        let mut car = self
            .cars
            .get_by_barcode(&request.car_barcode)
            .await?
            .ok_or_else(|| not_found("Car", &request.car_barcode))?;
        let member = self
            .members
            .get_by_id(request.member_id)
            .await?
            .ok_or_else(|| not_found("Member", request.member_id))?;
        let pick_up = self.location_by_code(&request.pick_up_location_code).await?;
        let drop_off = self.location_by_code(&request.drop_off_location_code).await?;

        if let Err(err) = car.reserve() {
            tracing::warn!(status = %car.status, "car is not available");
            return Err(err);
        }

        let created_at = now();
        let mut reservation = Reservation::builder()
            .car_id(car.id)
            .member_id(member.id)
            .pick_up_location_id(pick_up.id)
            .drop_off_location_id(drop_off.id)
            .day_count(request.day_count)
            .created_at(created_at)
            .pick_up_at(request.pick_up_at.unwrap_or(created_at))
            .build()?;
        reservation.activate()?;

        let reservation = self.reservations.create(reservation, &car).await?;
        tracing::info!(number = %reservation.number, "reservation made");
        Ok(reservation)
    }

    /// Look up a reservation by number.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no reservation has `number`.
    #[tracing::instrument(skip(self))]
    pub async fn get_reservation(
        &self,
        number: &ReservationNumber,
    ) -> Result<Reservation, RentalError> {
        self.reservations
            .get_by_number(number)
            .await?
            .ok_or_else(|| not_found("Reservation", number))
    }

    /// List all reservations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_reservations(&self) -> Result<Vec<Reservation>, RentalError> {
        self.reservations.get_all().await
    }

    /// Reservations created between `start` and `end`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `start` is after `end`.
    #[tracing::instrument(skip(self))]
    pub async fn reservations_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Reservation>, RentalError> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            }
            .into());
        }
        self.reservations.find_created_between(start, end).await
    }

    /// The member brought the car back: reservation `COMPLETED`, car `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the reservation is absent, or
    /// [`RentalError::Conflict`] unless it is `ACTIVE`.
    #[tracing::instrument(skip(self))]
    pub async fn return_car(&self, number: &ReservationNumber) -> Result<bool, RentalError> {
        let mut reservation = self.get_reservation(number).await?;
        reservation.complete()?;
        self.release_car(&reservation).await?;
        tracing::info!("car returned");
        Ok(true)
    }

    /// Call off a reservation: reservation `CANCELLED`, car `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the reservation is absent, or
    /// [`RentalError::Conflict`] unless it is `ACTIVE`.
    #[tracing::instrument(skip(self))]
    pub async fn cancel_reservation(
        &self,
        number: &ReservationNumber,
    ) -> Result<bool, RentalError> {
        let mut reservation = self.get_reservation(number).await?;
        reservation.cancel()?;
        self.release_car(&reservation).await?;
        tracing::info!("reservation cancelled");
        Ok(true)
    }

    /// Attach equipment to an open reservation. Attaching twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the reservation or equipment is
    /// absent, or [`RentalError::Conflict`] when the reservation is closed.
    #[tracing::instrument(skip(self))]
    pub async fn add_equipment(
        &self,
        number: &ReservationNumber,
        equipment_id: EquipmentId,
    ) -> Result<bool, RentalError> {
        let mut reservation = self.get_reservation(number).await?;
        self.equipment
            .get_by_id(equipment_id)
            .await?
            .ok_or_else(|| not_found("Equipment", equipment_id))?;
        if reservation.attach_equipment(equipment_id)? {
            self.reservations
                .attach_equipment(reservation.id, equipment_id)
                .await?;
        }
        Ok(true)
    }

    /// Attach an additional service to an open reservation. Attaching twice is harmless.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the reservation or service is
    /// absent, or [`RentalError::Conflict`] when the reservation is closed.
    #[tracing::instrument(skip(self))]
    pub async fn add_service(
        &self,
        number: &ReservationNumber,
        service_id: AdditionalServiceId,
    ) -> Result<bool, RentalError> {
        let mut reservation = self.get_reservation(number).await?;
        self.services
            .get_by_id(service_id)
            .await?
            .ok_or_else(|| not_found("AdditionalService", service_id))?;
        if reservation.attach_service(service_id)? {
            self.reservations
                .attach_service(reservation.id, service_id)
                .await?;
        }
        Ok(true)
    }

    /// Remove a reservation and its attachments. The car's status is left as is.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the reservation is absent.
    #[tracing::instrument(skip(self))]
    pub async fn delete_reservation(&self, number: &ReservationNumber) -> Result<bool, RentalError> {
        let reservation = self.get_reservation(number).await?;
        self.reservations.delete(reservation.id).await
    }

    async fn location_by_code(&self, code: &str) -> Result<Location, RentalError> {
        self.locations
            .get_by_code(code)
            .await?
            .ok_or_else(|| not_found("Location", code))
    }

    async fn release_car(&self, reservation: &Reservation) -> Result<(), RentalError> {
        let mut car: Car = self
            .cars
            .get_by_id(reservation.car_id)
            .await?
            .ok_or_else(|| not_found("Car", reservation.car_id))?;
        car.release();
        self.reservations.update_status(reservation, &car).await
    }
}

fn not_found(entity: &'static str, id: impl ToString) -> RentalError {
    NotFoundError {
        entity,
        id: id.to_string(),
    }
    .into()
}
