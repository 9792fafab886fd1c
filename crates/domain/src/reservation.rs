//! Reservation: a member's claim on a car between two locations.
//!
//! A reservation references its car, member and locations by id only. The
//! transition methods here guard the status machine; keeping the car's status
//! in step is the job of the application layer, which persists both in one
//! unit of work.

mod number;
mod status;

pub use number::ReservationNumber;
pub use status::ReservationStatus;

use std::collections::BTreeSet;

use chrono::{Datelike, Duration};
use serde::{Deserialize, Serialize};

use crate::error::{ConflictError, RentalError, ValidationError};
use crate::id::{AdditionalServiceId, CarId, EquipmentId, LocationId, MemberId, ReservationId};
use crate::time::{Timestamp, now};

/// Timestamps are stored with a four-digit year.
const LATEST_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub number: ReservationNumber,
    pub car_id: CarId,
    pub member_id: MemberId,
    pub pick_up_location_id: LocationId,
    pub drop_off_location_id: LocationId,
    pub day_count: u32,
    pub created_at: Timestamp,
    pub pick_up_at: Timestamp,
    pub drop_off_at: Timestamp,
    pub status: ReservationStatus,
    pub equipment_ids: BTreeSet<EquipmentId>,
    pub service_ids: BTreeSet<AdditionalServiceId>,
}

impl Reservation {
    /// Create a builder for a new, `PENDING` reservation.
    #[must_use]
    pub fn builder() -> ReservationBuilder {
        ReservationBuilder::default()
    }

    /// `PENDING` → `ACTIVE`.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::InvalidTransition`] from any other status.
    pub fn activate(&mut self) -> Result<(), RentalError> {
        self.transition(ReservationStatus::Active)
    }

    /// `ACTIVE` → `COMPLETED`; the car has been returned.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::InvalidTransition`] unless the reservation is active.
    pub fn complete(&mut self) -> Result<(), RentalError> {
        self.transition(ReservationStatus::Completed)
    }

    /// `ACTIVE` → `CANCELLED`.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::InvalidTransition`] unless the reservation is active.
    pub fn cancel(&mut self) -> Result<(), RentalError> {
        self.transition(ReservationStatus::Cancelled)
    }

    fn transition(&mut self, next: ReservationStatus) -> Result<(), RentalError> {
        if !self.status.can_transition_to(next) {
            return Err(ConflictError::InvalidTransition {
                entity: "Reservation",
                from: self.status.to_string(),
                to: next.to_string(),
            }
            .into());
        }
        self.status = next;
        Ok(())
    }

    /// Extras may only be attached while the reservation is still open.
    ///
    /// # Errors
    ///
    /// Returns [`ConflictError::ReservationClosed`] when the reservation is
    /// completed or cancelled.
    pub fn ensure_open(&self) -> Result<(), RentalError> {
        if self.status.is_terminal() {
            return Err(ConflictError::ReservationClosed {
                number: self.number.to_string(),
                status: self.status.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Attach equipment. Returns `false` when it was already attached.
    ///
    /// # Errors
    ///
    /// Fails when the reservation is no longer open.
    pub fn attach_equipment(&mut self, id: EquipmentId) -> Result<bool, RentalError> {
        self.ensure_open()?;
        Ok(self.equipment_ids.insert(id))
    }

    /// Attach an additional service. Returns `false` when it was already attached.
    ///
    /// # Errors
    ///
    /// Fails when the reservation is no longer open.
    pub fn attach_service(&mut self, id: AdditionalServiceId) -> Result<bool, RentalError> {
        self.ensure_open()?;
        Ok(self.service_ids.insert(id))
    }
}

/// Step-by-step builder for a new [`Reservation`].
#[derive(Debug, Default)]
pub struct ReservationBuilder {
    car_id: Option<CarId>,
    member_id: Option<MemberId>,
    pick_up_location_id: Option<LocationId>,
    drop_off_location_id: Option<LocationId>,
    day_count: u32,
    created_at: Option<Timestamp>,
    pick_up_at: Option<Timestamp>,
}

impl ReservationBuilder {
    #[must_use]
    pub fn car_id(mut self, car_id: CarId) -> Self {
        self.car_id = Some(car_id);
        self
    }

    #[must_use]
    pub fn member_id(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }

    #[must_use]
    pub fn pick_up_location_id(mut self, id: LocationId) -> Self {
        self.pick_up_location_id = Some(id);
        self
    }

    #[must_use]
    pub fn drop_off_location_id(mut self, id: LocationId) -> Self {
        self.drop_off_location_id = Some(id);
        self
    }

    #[must_use]
    pub fn day_count(mut self, day_count: u32) -> Self {
        self.day_count = day_count;
        self
    }

    #[must_use]
    pub fn created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Defaults to the creation time.
    #[must_use]
    pub fn pick_up_at(mut self, pick_up_at: Timestamp) -> Self {
        self.pick_up_at = Some(pick_up_at);
        self
    }

    /// Build a `PENDING` reservation with a freshly generated number.
    ///
    /// The drop-off time is `day_count` days after pick-up.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when a reference is missing,
    /// `day_count` is zero, or the drop-off time falls past year 9999.
    pub fn build(self) -> Result<Reservation, RentalError> {
        if self.day_count == 0 {
            return Err(ValidationError::InvalidDayCount.into());
        }
        let created_at = self.created_at.unwrap_or_else(now);
        let pick_up_at = self.pick_up_at.unwrap_or(created_at);
        let drop_off_at = Duration::try_days(i64::from(self.day_count))
            .and_then(|span| pick_up_at.checked_add_signed(span))
            .filter(|at| at.year() <= LATEST_YEAR)
            .ok_or(ValidationError::DropOffOutOfRange)?;

        Ok(Reservation {
            id: ReservationId::new(),
            number: ReservationNumber::generate(),
            car_id: self.car_id.ok_or(ValidationError::MissingField("car_id"))?,
            member_id: self
                .member_id
                .ok_or(ValidationError::MissingField("member_id"))?,
            pick_up_location_id: self
                .pick_up_location_id
                .ok_or(ValidationError::MissingField("pick_up_location_id"))?,
            drop_off_location_id: self
                .drop_off_location_id
                .ok_or(ValidationError::MissingField("drop_off_location_id"))?,
            day_count: self.day_count,
            created_at,
            pick_up_at,
            drop_off_at,
            status: ReservationStatus::Pending,
            equipment_ids: BTreeSet::new(),
            service_ids: BTreeSet::new(),
        })
    }
}
