//! Additional service catalog: use-cases for priced non-physical extras.

use carrental_domain::additional_service::AdditionalService;
use carrental_domain::error::{NotFoundError, RentalError};
use carrental_domain::id::AdditionalServiceId;

use crate::ports::AdditionalServiceRepository;

/// Application service for additional service CRUD operations.
pub struct AdditionalServiceService<R> {
    repo: R,
}

impl<R: AdditionalServiceRepository> AdditionalServiceService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a service to the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    #[tracing::instrument(skip(self, service), fields(service_name = %service.name))]
    pub async fn add_service(
        &self,
        service: AdditionalService,
    ) -> Result<AdditionalService, RentalError> {
        service.validate()?;
        self.repo.create(service).await
    }

    /// Look up a service by id.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no service with `id` exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_service(&self, id: AdditionalServiceId) -> Result<AdditionalService, RentalError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "AdditionalService",
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
    pub async fn list_services(&self) -> Result<Vec<AdditionalService>, RentalError> {
        self.repo.get_all().await
    }

    /// Replace name and price of service `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the service is absent, or
    /// [`RentalError::Validation`] if invariants fail.
    #[tracing::instrument(skip(self, service))]
    pub async fn update_service(
        &self,
        id: AdditionalServiceId,
        mut service: AdditionalService,
    ) -> Result<AdditionalService, RentalError> {
        self.get_service(id).await?;
        service.id = id;
        service.validate()?;
        self.repo.update(service).await
    }

    /// Delete service `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the service is absent, or
    /// [`RentalError::Conflict`] while it is attached to a reservation.
    #[tracing::instrument(skip(self))]
    pub async fn delete_service(&self, id: AdditionalServiceId) -> Result<(), RentalError> {
        self.get_service(id).await?;
        self.repo.delete(id).await?;
        Ok(())
    }
}
