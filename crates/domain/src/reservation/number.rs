//! Reservation number: the human-readable handle callers use for a reservation.

use std::fmt;

use serde::{Deserialize, Serialize};

const PREFIX: &str = "RES";
const RANDOM_LEN: usize = 8;

/// System-generated unique reservation handle, e.g. `RES1A2B3C4D`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationNumber(String);

impl ReservationNumber {
    /// Generate a fresh number: `RES` followed by eight uppercase hex digits.
    ///
    /// Uniqueness is finally enforced by storage; a collision surfaces as a
    /// conflict on insert.
    #[must_use]
    pub fn generate() -> Self {
        let random = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{PREFIX}{}", random[..RANDOM_LEN].to_uppercase()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ReservationNumber {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ReservationNumber {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for ReservationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
