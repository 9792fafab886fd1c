//! `SQLite` implementation of [`EquipmentRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::EquipmentRepository;
use carrental_domain::equipment::Equipment;
use carrental_domain::error::{ConflictError, RentalError};
use carrental_domain::id::EquipmentId;

use crate::error::{StorageError, on_foreign_key_violation};
use crate::row::parsed;

/// Wrapper for converting database rows into domain [`Equipment`].
struct Wrapper(Equipment);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Equipment> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Equipment {
            id: parsed(row, "id")?,
            name: row.try_get("name")?,
            price: parsed(row, "price")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO equipment (id, name, price) VALUES (?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM equipment WHERE id = ?";
const SELECT_ALL: &str = "SELECT * FROM equipment ORDER BY name";
const UPDATE: &str = "UPDATE equipment SET name = ?, price = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM equipment WHERE id = ?";

/// `SQLite`-backed equipment repository.
pub struct SqliteEquipmentRepository {
    pool: SqlitePool,
}

impl SqliteEquipmentRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl EquipmentRepository for SqliteEquipmentRepository {
    fn create(
        &self,
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(equipment.id.to_string())
                .bind(&equipment.name)
                .bind(equipment.price.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(equipment)
        }
    }

    fn get_by_id(
        &self,
        id: EquipmentId,
    ) -> impl Future<Output = Result<Option<Equipment>, RentalError>> + Send {
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

    fn get_all(&self) -> impl Future<Output = Result<Vec<Equipment>, RentalError>> + Send {
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
        equipment: Equipment,
    ) -> impl Future<Output = Result<Equipment, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&equipment.name)
                .bind(equipment.price.to_string())
                .bind(equipment.id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(equipment)
        }
    }

    fn delete(&self, id: EquipmentId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    on_foreign_key_violation(err, || ConflictError::InUse {
                        entity: "Equipment",
                        id: id.to_string(),
                    })
                })?;

            Ok(result.rows_affected() > 0)
        }
    }
}
