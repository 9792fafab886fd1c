//! Location service: use-cases for managing rental branches.

use carrental_domain::error::{ConflictError, NotFoundError, RentalError};
use carrental_domain::id::LocationId;
use carrental_domain::location::Location;

use crate::ports::LocationRepository;

/// Application service for location CRUD operations.
pub struct LocationService<R> {
    repo: R,
}

impl<R: LocationRepository> LocationService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Add a new location.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if invariants fail, or
    /// [`RentalError::Conflict`] when the code is already used.
    #[tracing::instrument(skip(self, location), fields(code = %location.code))]
    pub async fn add_location(&self, location: Location) -> Result<Location, RentalError> {
        location.validate()?;
        if self.repo.get_by_code(&location.code).await?.is_some() {
            return Err(duplicate_code(&location.code));
        }
        self.repo.create(location).await
    }

    /// Look up a location by id.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no location with `id` exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_location(&self, id: LocationId) -> Result<Location, RentalError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Location",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// Look up a location by its code.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no location has `code`.
    #[tracing::instrument(skip(self))]
    pub async fn get_location_by_code(&self, code: &str) -> Result<Location, RentalError> {
        self.repo.get_by_code(code).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Location",
                id: code.to_string(),
            }
            .into()
        })
    }

    /// List all locations.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_locations(&self) -> Result<Vec<Location>, RentalError> {
        self.repo.get_all().await
    }

    /// Replace the details of location `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the location is absent,
    /// [`RentalError::Validation`] if invariants fail, or
    /// [`RentalError::Conflict`] when the code belongs to another location.
    #[tracing::instrument(skip(self, location))]
    pub async fn update_location(
        &self,
        id: LocationId,
        mut location: Location,
    ) -> Result<Location, RentalError> {
        self.get_location(id).await?;
        location.id = id;
        location.validate()?;
        let holder = self.repo.get_by_code(&location.code).await?;
        if holder.is_some_and(|other| other.id != id) {
            return Err(duplicate_code(&location.code));
        }
        self.repo.update(location).await
    }

    /// Delete location `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the location is absent, or
    /// [`RentalError::Conflict`] while reservations still refer to it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_location(&self, id: LocationId) -> Result<(), RentalError> {
        self.get_location(id).await?;
        self.repo.delete(id).await?;
        Ok(())
    }
}

fn duplicate_code(code: &str) -> RentalError {
    ConflictError::Duplicate {
        entity: "Location",
        field: "code",
        value: code.to_string(),
    }
    .into()
}
