//! Equipment service: use-cases for the equipment catalog.

use carrental_domain::equipment::Equipment;
use carrental_domain::error::{NotFoundError, RentalError};
use carrental_domain::id::EquipmentId;

use crate::ports::EquipmentRepository;

/// Application service for equipment CRUD operations.
pub struct EquipmentService<R> {
    repo: R,
}

impl<R: EquipmentRepository> EquipmentService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add equipment to the catalog after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, equipment), fields(equipment_name = %equipment.name))]
    pub async fn add_equipment(&self, equipment: Equipment) -> Result<Equipment, RentalError> {
        equipment.validate()?;
        self.repo.create(equipment).await
    }

    /// Look up equipment by id.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no equipment with `id` exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_equipment(&self, id: EquipmentId) -> Result<Equipment, RentalError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Equipment",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_equipment(&self) -> Result<Vec<Equipment>, RentalError> {
        self.repo.get_all().await
    }

    /// Replace name and price of equipment `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the equipment is absent, or
    /// [`RentalError::Validation`] if invariants fail.
    #[tracing::instrument(skip(self, equipment))]
    pub async fn update_equipment(
        &self,
        id: EquipmentId,
        mut equipment: Equipment,
    ) -> Result<Equipment, RentalError> {
        self.get_equipment(id).await?;
        equipment.id = id;
        equipment.validate()?;
        self.repo.update(equipment).await
    }

    /// Delete equipment `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the equipment is absent, or
    /// [`RentalError::Conflict`] while it is attached to a reservation.
    #[tracing::instrument(skip(self))]
    pub async fn delete_equipment(&self, id: EquipmentId) -> Result<(), RentalError> {
        self.get_equipment(id).await?;
        self.repo.delete(id).await?;
        Ok(())
    }
}
