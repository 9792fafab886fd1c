//! `SQLite` implementation of [`AdditionalServiceRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::AdditionalServiceRepository;
use carrental_domain::additional_service::AdditionalService;
use carrental_domain::error::{ConflictError, RentalError};
use carrental_domain::id::AdditionalServiceId;

use crate::error::{StorageError, on_foreign_key_violation};
use crate::row::parsed;

struct Wrapper(AdditionalService);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<AdditionalService> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(AdditionalService {
            id: parsed(row, "id")?,
            name: row.try_get("name")?,
            price: parsed(row, "price")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO additional_services (id, name, price) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM additional_services WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM additional_services ORDER BY name";
const UPDATE: &str = "UPDATE additional_services SET name = ?, price = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM additional_services WHERE id = ?";

/// `SQLite`-backed additional service repository.
pub struct SqliteAdditionalServiceRepository {
    pool: SqlitePool,
}

impl SqliteAdditionalServiceRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl AdditionalServiceRepository for SqliteAdditionalServiceRepository {
    fn create(
        &self,
        service: AdditionalService,
    ) -> impl Future<Output = Result<AdditionalService, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(service.id.to_string())
                .bind(&service.name)
                .bind(service.price.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(service)
        }
    }

    fn get_by_id(
        &self,
        id: AdditionalServiceId,
    ) -> impl Future<Output = Result<Option<AdditionalService>, RentalError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<AdditionalService>, RentalError>> + Send {
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
        service: AdditionalService,
    ) -> impl Future<Output = Result<AdditionalService, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&service.name)
                .bind(service.price.to_string())
                .bind(service.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(service)
        }
    }

    fn delete(
        &self,
        id: AdditionalServiceId,
    ) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    on_foreign_key_violation(err, || ConflictError::InUse {
                        entity: "AdditionalService",
                        id: id.to_string(),
                    })
                })?;

            Ok(result.rows_affected() > 0)
        }
    }
}
