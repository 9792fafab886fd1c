//! Car classification used by availability searches.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLabelError;

/// Rental category of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CarType {
    Economy,
    Compact,
    Midsize,
    Standard,
    Fullsize,
    Suv,
    Minivan,
    Luxury,
}

impl CarType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Economy => "ECONOMY",
            Self::Compact => "COMPACT",
            Self::Midsize => "MIDSIZE",
            Self::Standard => "STANDARD",
            Self::Fullsize => "FULLSIZE",
            Self::Suv => "SUV",
            Self::Minivan => "MINIVAN",
            Self::Luxury => "LUXURY",
        }
    }
}

impl fmt::Display for CarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CarType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ECONOMY" => Ok(Self::Economy),
            "COMPACT" => Ok(Self::Compact),
            "MIDSIZE" => Ok(Self::Midsize),
            "STANDARD" => Ok(Self::Standard),
            "FULLSIZE" => Ok(Self::Fullsize),
            "SUV" => Ok(Self::Suv),
            "MINIVAN" => Ok(Self::Minivan),
            "LUXURY" => Ok(Self::Luxury),
            other => Err(ParseLabelError {
                kind: "car type",
                value: other.to_string(),
            }),
        }
    }
}

/// Gearbox of a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransmissionType {
    Manual,
    Automatic,
}

impl TransmissionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "MANUAL",
            Self::Automatic => "AUTOMATIC",
        }
    }
}

impl fmt::Display for TransmissionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransmissionType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MANUAL" => Ok(Self::Manual),
            "AUTOMATIC" => Ok(Self::Automatic),
            other => Err(ParseLabelError {
                kind: "transmission type",
                value: other.to_string(),
            }),
        }
    }
}
