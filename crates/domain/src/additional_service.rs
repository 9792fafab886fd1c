//! Additional service: a priced non-physical extra (insurance, extra driver,
//! …) that can be attached to a reservation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RentalError, ValidationError};
use crate::id::AdditionalServiceId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdditionalService {
    pub id: AdditionalServiceId,
    pub name: String,
    pub price: Decimal,
}

impl AdditionalService {
    /// Create a service with a fresh id and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `name` is empty or `price` is negative.
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self, RentalError> {
        let service = Self {
            id: AdditionalServiceId::new(),
            name: name.into(),
            price,
        };
        service.validate()?;
        Ok(service)
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `name` is empty or `price` is negative.
    pub fn validate(&self) -> Result<(), RentalError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyField("name").into());
        }
        if self.price.is_sign_negative() {
            return Err(ValidationError::NegativePrice("price").into());
        }
        Ok(())
    }
}
