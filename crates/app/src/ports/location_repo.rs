//! Location repository port.

use std::future::Future;

use carrental_domain::error::RentalError;
use carrental_domain::id::LocationId;
use carrental_domain::location::Location;

/// Repository for persisting and querying [`Location`]s.
pub trait LocationRepository {
    /// Create a new location. A code already in use is a conflict.
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, RentalError>> + Send;

    fn get_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, RentalError>> + Send;

    /// Look up a location by its unique code.
    fn get_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Location>, RentalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Location>, RentalError>> + Send;

    fn update(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, RentalError>> + Send;

    /// Delete a location by id. Returns `false` when no row matched.
    fn delete(&self, id: LocationId) -> impl Future<Output = Result<bool, RentalError>> + Send;
}
