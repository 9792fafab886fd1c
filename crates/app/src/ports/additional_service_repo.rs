//! Additional service repository port.

use std::future::Future;

use carrental_domain::additional_service::AdditionalService;
use carrental_domain::error::RentalError;
use carrental_domain::id::AdditionalServiceId;

/// Repository for persisting and querying [`AdditionalService`]s.
pub trait AdditionalServiceRepository {
    fn create(
        &self,
        service: AdditionalService,
    ) -> impl Future<Output = Result<AdditionalService, RentalError>> + Send;

    fn get_by_id(
        &self,
        id: AdditionalServiceId,
    ) -> impl Future<Output = Result<Option<AdditionalService>, RentalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<AdditionalService>, RentalError>> + Send;

    fn update(
        &self,
        service: AdditionalService,
    ) -> impl Future<Output = Result<AdditionalService, RentalError>> + Send;

    /// Delete a service by id. Returns `false` when no row matched.
    fn delete(
        &self,
        id: AdditionalServiceId,
    ) -> impl Future<Output = Result<bool, RentalError>> + Send;
}
