//! Equipment repository port.

use std::future::Future;

use carrental_domain::equipment::Equipment;
use carrental_domain::error::RentalError;
use carrental_domain::id::EquipmentId;

/// Repository for persisting and querying [`Equipment`].
pub trait EquipmentRepository {
    fn create(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, RentalError>> + Send;

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, RentalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, RentalError>> + Send;

    fn update(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, RentalError>> + Send;

    /// Delete equipment by id. Returns `false` when no row matched.
    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, RentalError>> + Send;
}
