//! Car service: use-cases for managing the fleet.

use carrental_domain::car::{Car, CarStatus, CarType, TransmissionType};
use carrental_domain::error::{ConflictError, NotFoundError, RentalError};
use carrental_domain::id::CarId;

use crate::ports::CarRepository;

/// Application service for car CRUD and availability queries.
pub struct CarService<R> {
    repo: R,
}

impl<R: CarRepository> CarService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a car to the fleet. Whatever status was submitted, the car is
    /// stored `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if invariants fail,
    /// [`RentalError::Conflict`] when the barcode is already used, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, car), fields(barcode = %car.barcode))]
    pub async fn add_car(&self, mut car: Car) -> Result<Car, RentalError> {
        car.status = CarStatus::Available;
        car.validate()?;
        if self.repo.get_by_barcode(&car.barcode).await?.is_some() {
            return Err(duplicate_barcode(&car.barcode));
        }
        self.repo.create(car).await
    }

    /// Look up a car by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no car with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_car(&self, id: CarId) -> Result<Car, RentalError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Car",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a car by its barcode.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no car carries `barcode`.
    #[tracing::instrument(skip(self))]
    pub async fn get_car_by_barcode(&self, barcode: &str) -> Result<Car, RentalError> {
        self.repo
            .get_by_barcode(barcode)
            .await?
            .ok_or_else(|| barcode_not_found(barcode))
    }

    /// List all cars.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_cars(&self) -> Result<Vec<Car>, RentalError> {
        self.repo.get_all().await
    }

    /// Replace the descriptive fields of car `id`. The stored status is kept.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the car is absent,
    /// [`RentalError::Validation`] if invariants fail, or
    /// [`RentalError::Conflict`] when the barcode belongs to another car.
    #[tracing::instrument(skip(self, car))]
    pub async fn update_car(&self, id: CarId, mut car: Car) -> Result<Car, RentalError> {
        let existing = self.get_car(id).await?;
        car.id = existing.id;
        car.validate()?;
        let taken = self.repo.get_by_barcode(&car.barcode).await?;
        if taken.is_some_and(|other| other.id != id) {
            return Err(duplicate_barcode(&car.barcode));
        }
        self.repo.update(car).await
    }

    /// Delete car `id`. Only an available car that no reservation refers to
    /// can be deleted.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the car is absent, or
    /// [`RentalError::Conflict`] when it is held or still referenced.
    #[tracing::instrument(skip(self))]
    pub async fn delete_car(&self, id: CarId) -> Result<(), RentalError> {
        let car = self.get_car(id).await?;
        if !car.is_available() {
            tracing::warn!(barcode = %car.barcode, status = %car.status, "refusing to delete held car");
            return Err(ConflictError::CarUnavailable {
                barcode: car.barcode,
                status: car.status.to_string(),
            }
            .into());
        }
        self.repo.delete(id).await?;
        Ok(())
    }

    /// Delete the car carrying `barcode`.
    ///
    /// Returns `false` and keeps the car when it is not `AVAILABLE`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no car carries `barcode`, or
    /// [`RentalError::Conflict`] when reservations still refer to it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_car_by_barcode(&self, barcode: &str) -> Result<bool, RentalError> {
        let car = self.get_car_by_barcode(barcode).await?;
        if !car.is_available() {
            tracing::warn!(%barcode, status = %car.status, "car is held, not deleting");
            return Ok(false);
        }
        self.repo.delete(car.id).await
    }

    /// Available cars of the given type and transmission.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn search_available_cars(
        &self,
        car_type: CarType,
        transmission_type: TransmissionType,
    ) -> Result<Vec<Car>, RentalError> {
        self.repo.find_available(car_type, transmission_type).await
    }

    /// Cars currently reserved or loaned.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn rented_cars(&self) -> Result<Vec<Car>, RentalError> {
        self.repo.find_rented().await
    }
}

fn duplicate_barcode(barcode: &str) -> RentalError {
    ConflictError::Duplicate {
        entity: "Car",
        field: "barcode",
        value: barcode.to_string(),
    }
    .into()
}

fn barcode_not_found(barcode: &str) -> RentalError {
    NotFoundError {
        entity: "Car",
        id: barcode.to_string(),
    }
    .into()
}
