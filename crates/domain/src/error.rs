//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into [`RentalError`]
//! via `#[from]`, so callers only ever match on four kinds of failure.

/// Top-level error returned by every service and repository operation.
#[derive(Debug, thiserror::Error)]
pub enum RentalError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    #[error("{0}")]
    Conflict(#[from] ConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Input that breaks a domain invariant before anything is persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0} must not be negative")]
    NegativePrice(&'static str),

    #[error("day count must be at least 1")]
    InvalidDayCount,

    #[error("drop-off time is out of range")]
    DropOffOutOfRange,

    #[error("start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

/// A referenced identifier, code or number does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// A business rule refused the operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConflictError {
    #[error("car {barcode} is not available (status {status})")]
    CarUnavailable { barcode: String, status: String },

    #[error("{entity} with {field} {value} already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("reservation {number} is already {status}")]
    ReservationClosed { number: String, status: String },

    #[error("{entity} {id} is still referenced")]
    InUse { entity: &'static str, id: String },
}

/// A stored or submitted label does not name any variant of an enum.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}
