//! `SQLite` implementation of [`LocationRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::LocationRepository;
use carrental_domain::error::{ConflictError, RentalError};
use carrental_domain::id::LocationId;
use carrental_domain::location::Location;

use crate::error::{StorageError, on_foreign_key_violation, on_unique_violation};
use crate::row::parsed;

/// Wrapper for converting database rows into domain [`Location`].
struct Wrapper(Location);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Location> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Location {
            id: parsed(row, "id")?,
            code: row.try_get("code")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO locations (id, code, name, address) VALUES (?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM locations WHERE id = ?";
const SELECT_BY_CODE: &str = "SELECT * FROM locations WHERE code = ?";
const SELECT_ALL: &str = "SELECT * FROM locations ORDER BY code";
const UPDATE: &str = "UPDATE locations SET code = ?, name = ?, address = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM locations WHERE id = ?";

/// `SQLite`-backed location repository.
pub struct SqliteLocationRepository {
    pool: SqlitePool,
}

impl SqliteLocationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn duplicate_code(location: &Location) -> ConflictError {
    ConflictError::Duplicate {
        entity: "Location",
        field: "code",
        value: location.code.clone(),
    }
}

impl LocationRepository for SqliteLocationRepository {
    fn create(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(location.id.to_string())
                .bind(&location.code)
                .bind(&location.name)
                .bind(&location.address)
                .execute(&pool)
                .await
                .map_err(|err| on_unique_violation(err, || duplicate_code(&location)))?;

            Ok(location)
        }
    }

    fn get_by_id(
        &self,
        id: LocationId,
    ) -> impl Future<Output = Result<Option<Location>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_by_code(
        &self,
        code: &str,
    ) -> impl Future<Output = Result<Option<Location>, RentalError>> + Send {
        let pool = self.pool.clone();
        let code = code.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_CODE)
                .bind(code)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Location>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(
        &self,
        location: Location,
    ) -> impl Future<Output = Result<Location, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&location.code)
                .bind(&location.name)
                .bind(&location.address)
                .bind(location.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| on_unique_violation(err, || duplicate_code(&location)))?;

            Ok(location)
        }
    }

    fn delete(&self, id: LocationId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    on_foreign_key_violation(err, || ConflictError::InUse {
                        entity: "Location",
                        id: id.to_string(),
                    })
                })?;

            Ok(result.rows_affected() > 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Config;

    async fn setup() -> SqliteLocationRepository {
        let db = Config {
            database_url: "sqlite::memory:".to_string(),
        }
        .build()
        .await
        .unwrap();
        SqliteLocationRepository::new(db.pool().clone())
    }

    #[tokio::test]
    async fn should_create_and_find_location_by_code() {
        let repo = setup().await;
        let stored = repo
            .create(Location::new("IST", "Istanbul Airport", None).unwrap())
            .await
            .unwrap();

        let fetched = repo.get_by_code("IST").await.unwrap().unwrap();
        assert_eq!(fetched, stored);
        assert!(repo.get_by_code("SAW").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn should_report_conflict_when_code_is_taken() {
        let repo = setup().await;
        repo.create(Location::new("IST", "Istanbul Airport", None).unwrap())
            .await
            .unwrap();

        let result = repo
            .create(Location::new("IST", "Somewhere else", None).unwrap())
            .await;
        assert!(matches!(result, Err(RentalError::Conflict(_))));
    }

    #[tokio::test]
    async fn should_list_locations_ordered_by_code() {
        let repo = setup().await;
        for code in ["SAW", "ESB", "IST"] {
            repo.create(Location::new(code, "Branch", None).unwrap())
                .await
                .unwrap();
        }

        let codes: Vec<String> = repo
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.code)
            .collect();
        assert_eq!(codes, ["ESB", "IST", "SAW"]);
    }

    #[tokio::test]
    async fn should_update_and_delete_location() {
        let repo = setup().await;
        let mut stored = repo
            .create(Location::new("IST", "Istanbul Airport", None).unwrap())
            .await
            .unwrap();

        stored.address = Some("Tayakadin".to_string());
        repo.update(stored.clone()).await.unwrap();
        let fetched = repo.get_by_id(stored.id).await.unwrap().unwrap();
        assert_eq!(fetched.address.as_deref(), Some("Tayakadin"));

        assert!(repo.delete(stored.id).await.unwrap());
        assert!(repo.get_by_id(stored.id).await.unwrap().is_none());
    }
}
