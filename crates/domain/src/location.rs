//! Location: a branch where cars are picked up and dropped off.

use serde::{Deserialize, Serialize};

use crate::error::{RentalError, ValidationError};
use crate::id::LocationId;

/// A rental branch, addressed by callers through its unique `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub code: String,
    pub name: String,
    pub address: Option<String>,
}

impl Location {
    /// Create a location with a fresh id and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `code` or `name` is empty.
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        address: Option<String>,
    ) -> Result<Self, RentalError> {
        let location = Self {
            id: LocationId::new(),
            code: code.into(),
            name: name.into(),
            address,
        };
        location.validate()?;
        Ok(location)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `code` or `name` is empty.
    pub fn validate(&self) -> Result<(), RentalError> {
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyField("code").into());
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        Ok(())
    }
}
