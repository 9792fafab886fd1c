//! Column decoding helpers shared by the row wrappers.

use std::str::FromStr;

use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::error::decode_error;

/// Read a TEXT column and parse it into a domain value (ids, labels,
/// decimals, timestamps).
pub(crate) fn parsed<T>(row: &SqliteRow, column: &'static str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|err| decode_error(column, err))
}
