//! Equipment: a priced physical extra (child seat, roof box, …) that can be
//! attached to a reservation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{RentalError, ValidationError};
use crate::id::EquipmentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: EquipmentId,
    pub name: String,
    pub price: Decimal,
}

impl Equipment {
    /// Create equipment with a fresh id and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::Validation`] when `name` is empty or `price` is negative.
    pub fn new(name: impl Into<String>, price: Decimal) -> Result<Self, RentalError> {
        let equipment = Self {
            id: EquipmentId::new(),
            name: name.into(),
            price,
        };
        equipment.validate()?;
        Ok(equipment)
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
