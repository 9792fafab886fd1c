//! Member service: use-cases for registering and managing customers.

use carrental_domain::error::{ConflictError, NotFoundError, RentalError};
use carrental_domain::id::MemberId;
use carrental_domain::member::Member;

use crate::ports::MemberRepository;

/// Application service for member CRUD operations.
pub struct MemberService<R> {
    repo: R,
}

impl<R: MemberRepository> MemberService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Register a new member.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if invariants fail, or
    /// [`RentalError::Conflict`] when the driving license number is already
    /// registered. No member is created in either case.
    #[tracing::instrument(skip(self, member), fields(member_name = %member.name))]
    pub async fn register_member(&self, member: Member) -> Result<Member, RentalError> {
        member.validate()?;
        if self
            .repo
            .get_by_license_number(&member.driving_license_number)
            .await?
            .is_some()
        {
            tracing::warn!("driving license number already registered");
            return Err(duplicate_license(&member.driving_license_number));
        }
        self.repo.create(member).await
    }

    /// Look up a member by id, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when no member with `id` exists,
    /// or a storage error from the repository.
    #[tracing::instrument(skip(self))]
    pub async fn get_member(&self, id: MemberId) -> Result<Member, RentalError> {
        self.repo.get_by_id(id).await?.ok_or_else(|| {
            NotFoundError {
                entity: "Member",
                id: id.to_string(),
            }
            .into()
        })
    }

    /// List all members.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_members(&self) -> Result<Vec<Member>, RentalError> {
        self.repo.get_all().await
    }

    /// Replace the details of member `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the member is absent,
    /// [`RentalError::Validation`] if invariants fail, or
    /// [`RentalError::Conflict`] when the license belongs to another member.
    #[tracing::instrument(skip(self, member))]
    pub async fn update_member(&self, id: MemberId, mut member: Member) -> Result<Member, RentalError> {
        self.get_member(id).await?;
        member.id = id;
        member.validate()?;
        let holder = self
            .repo
            .get_by_license_number(&member.driving_license_number)
            .await?;
        if holder.is_some_and(|other| other.id != id) {
            return Err(duplicate_license(&member.driving_license_number));
        }
        self.repo.update(member).await
    }

    /// Delete member `id`.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::NotFound`] when the member is absent, or
    /// [`RentalError::Conflict`] while reservations still refer to it.
    #[tracing::instrument(skip(self))]
    pub async fn delete_member(&self, id: MemberId) -> Result<(), RentalError> {
        self.get_member(id).await?;
        self.repo.delete(id).await?;
        Ok(())
    }
}

fn duplicate_license(license_number: &str) -> RentalError {
    ConflictError::Duplicate {
        entity: "Member",
        field: "driving_license_number",
        value: license_number.to_string(),
    }
    .into()
}
