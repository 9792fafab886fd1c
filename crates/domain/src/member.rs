//! Member: a registered customer allowed to rent cars.

use serde::{Deserialize, Serialize};

use crate::error::{RentalError, ValidationError};
use crate::id::MemberId;

/// A registered customer. The driving license number is unique across members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub driving_license_number: String,
}

impl Member {
    /// Create a builder for constructing a [`Member`].
    #[must_use]
    pub fn builder() -> MemberBuilder {
        MemberBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when the name or the driving
    /// license number is empty.
    pub fn validate(&self) -> Result<(), RentalError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if self.driving_license_number.trim().is_empty() {
            return Err(ValidationError::EmptyField("driving_license_number").into());
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Member`].
#[derive(Debug, Default)]
pub struct MemberBuilder {
    id: Option<MemberId>,
    name: Option<String>,
    address: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    driving_license_number: Option<String>,
}

impl MemberBuilder {
    #[must_use]
    pub fn id(mut self, id: MemberId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn driving_license_number(mut self, number: impl Into<String>) -> Self {
        self.driving_license_number = Some(number.into());
        self
    }

    /// Consume the builder, validate, and return a [`Member`].
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] if the name or license is missing.
    pub fn build(self) -> Result<Member, RentalError> {
        let member = Member {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            address: self.address,
            email: self.email,
            phone: self.phone,
            driving_license_number: self.driving_license_number.unwrap_or_default(),
        };
        member.validate()?;
        Ok(member)
    }
}
