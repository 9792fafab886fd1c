//! Car status: whether a car can be handed to a new reservation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLabelError;

/// Availability of a car. Only the reservation lifecycle moves a car between
/// these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarStatus {
    #[default]
    Available,
    Reserved,
    Loaned,
}

impl CarStatus {
    /// Label used on the wire and in storage.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Reserved => "RESERVED",
            Self::Loaned => "LOANED",
        }
    }

    /// Whether the car is currently held by a reservation.
    #[must_use]
    pub fn is_rented(self) -> bool {
        matches!(self, Self::Reserved | Self::Loaned)
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarStatus {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "RESERVED" => Ok(Self::Reserved),
            "LOANED" => Ok(Self::Loaned),
            other => Err(ParseLabelError {
                kind: "car status",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_available() {
        assert_eq!(CarStatus::default(), CarStatus::Available);
    }

    #[test]
    fn should_report_rented_when_reserved_or_loaned() {
        assert!(CarStatus::Reserved.is_rented());
        assert!(CarStatus::Loaned.is_rented());
        assert!(!CarStatus::Available.is_rented());
    }

    #[test]
    fn should_parse_storage_label() {
        assert_eq!("LOANED".parse::<CarStatus>().unwrap(), CarStatus::Loaned);
        assert!("loaned".parse::<CarStatus>().is_err());
    }

    #[test]
    fn should_serialize_as_screaming_snake_case() {
        let json = serde_json::to_string(&CarStatus::Reserved).unwrap();
        assert_eq!(json, "\"RESERVED\"");
    }
}
