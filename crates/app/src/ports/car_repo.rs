//! Car repository port: persistence and finders for the fleet.

use std::future::Future;

use carrental_domain::car::{Car, CarType, TransmissionType};
use carrental_domain::error::RentalError;
use carrental_domain::id::CarId;

/// Repository for persisting and querying [`Car`]s.
pub trait CarRepository {
    /// Create a new car in storage.
    ///
    /// A barcode already in use is reported as a conflict.
    fn create(&self, car: Car) -> impl Future<Output = Result<Car, RentalError>> + Send;

    /// Get a car by its unique identifier.
    fn get_by_id(&self, id: CarId)
    -> impl Future<Output = Result<Option<Car>, RentalError>> + Send;

    /// Get a car by its unique barcode.
    fn get_by_barcode(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<Option<Car>, RentalError>> + Send;

    /// Get all cars.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send;

    /// Cars of the given type and transmission whose status is `AVAILABLE`.
    fn find_available(
        &self,
        car_type: CarType,
        transmission_type: TransmissionType,
    ) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send;

    /// Cars whose status is `RESERVED` or `LOANED`.
    fn find_rented(&self) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send;

    /// Update the descriptive fields of an existing car and return it as
    /// stored. The status column is never written here; only reservation
    /// writes move it.
    fn update(&self, car: Car) -> impl Future<Output = Result<Car, RentalError>> + Send;

    /// Delete a car by id. Returns `false` when no row matched.
    fn delete(&self, id: CarId) -> impl Future<Output = Result<bool, RentalError>> + Send;
}
