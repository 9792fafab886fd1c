//! Time and timestamp helpers.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// UTC timestamp used for reservation creation, pick-up and drop-off times.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to the microsecond precision that
/// [`to_sortable`] keeps.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(6)
}

/// Render a timestamp in a fixed-width RFC 3339 form (microseconds, `Z`).
///
/// Two values rendered this way compare lexicographically in the same order
/// as the timestamps themselves, which storage relies on for range queries.
#[must_use]
pub fn to_sortable(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}
