//! `SQLite` implementation of [`CarRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::CarRepository;
use carrental_domain::car::{Car, CarType, TransmissionType};
use carrental_domain::error::{ConflictError, NotFoundError, RentalError};
use carrental_domain::id::CarId;

use crate::error::{StorageError, on_foreign_key_violation, on_unique_violation};
use crate::row::parsed;

/// Wrapper for converting database rows into domain [`Car`].
struct Wrapper(Car);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Car> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Car {
            id: parsed(row, "id")?,
            barcode: row.try_get("barcode")?,
            license_plate: row.try_get("license_plate")?,
            brand: row.try_get("brand")?,
            model: row.try_get("model")?,
            passenger_capacity: row.try_get("passenger_capacity")?,
            mileage: row.try_get("mileage")?,
            daily_price: parsed(row, "daily_price")?,
            transmission_type: parsed(row, "transmission_type")?,
            car_type: parsed(row, "car_type")?,
            status: parsed(row, "status")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO cars (id, barcode, license_plate, brand, model, passenger_capacity, mileage, daily_price, transmission_type, car_type, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM cars WHERE id = ?";
const SELECT_BY_BARCODE: &str = "SELECT * FROM cars WHERE barcode = ?";
const SELECT_ALL: &str = "SELECT * FROM cars ORDER BY barcode";
const SELECT_AVAILABLE: &str = "SELECT * FROM cars WHERE car_type = ? AND transmission_type = ? AND status = 'AVAILABLE' ORDER BY barcode";
const SELECT_RENTED: &str =
    "SELECT * FROM cars WHERE status IN ('RESERVED', 'LOANED') ORDER BY barcode";
const UPDATE: &str = "UPDATE cars SET barcode = ?, license_plate = ?, brand = ?, model = ?, passenger_capacity = ?, mileage = ?, daily_price = ?, transmission_type = ?, car_type = ? WHERE id = ? RETURNING *";
const DELETE_BY_ID: &str = "DELETE FROM cars WHERE id = ?";

/// `SQLite`-backed car repository.
pub struct SqliteCarRepository {
    pool: SqlitePool,
}

impl SqliteCarRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn duplicate_barcode(car: &Car) -> ConflictError {
    ConflictError::Duplicate {
        entity: "Car",
        field: "barcode",
        value: car.barcode.clone(),
    }
}

impl CarRepository for SqliteCarRepository {
    fn create(&self, car: Car) -> impl Future<Output = Result<Car, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(car.id.to_string())
                .bind(&car.barcode)
                .bind(&car.license_plate)
                .bind(&car.brand)
                .bind(&car.model)
                .bind(car.passenger_capacity)
                .bind(car.mileage)
                .bind(car.daily_price.to_string())
                .bind(car.transmission_type.as_str())
                .bind(car.car_type.as_str())
                .bind(car.status.as_str())
                .execute(&pool)
                .await
                .map_err(|err| on_unique_violation(err, || duplicate_barcode(&car)))?;

            Ok(car)
        }
    }

    fn get_by_id(&self, id: CarId) -> impl Future<Output = Result<Option<Car>, RentalError>> + Send {
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

    fn get_by_barcode(
        &self,
        barcode: &str,
    ) -> impl Future<Output = Result<Option<Car>, RentalError>> + Send {
        let pool = self.pool.clone();
        let barcode = barcode.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_BARCODE)
                .bind(barcode)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_available(
        &self,
        car_type: CarType,
        transmission_type: TransmissionType,
    ) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_AVAILABLE)
                .bind(car_type.as_str())
                .bind(transmission_type.as_str())
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn find_rented(&self) -> impl Future<Output = Result<Vec<Car>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_RENTED)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, car: Car) -> impl Future<Output = Result<Car, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(UPDATE)
                .bind(&car.barcode)
                .bind(&car.license_plate)
                .bind(&car.brand)
                .bind(&car.model)
                .bind(car.passenger_capacity)
                .bind(car.mileage)
                .bind(car.daily_price.to_string())
                .bind(car.transmission_type.as_str())
                .bind(car.car_type.as_str())
                .bind(car.id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(|err| on_unique_violation(err, || duplicate_barcode(&car)))?;

            Wrapper::maybe(row).ok_or_else(|| {
                RentalError::from(NotFoundError {
                    entity: "Car",
                    id: car.id.to_string(),
                })
            })
        }
    }

    fn delete(&self, id: CarId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    on_foreign_key_violation(err, || ConflictError::InUse {
                        entity: "Car",
                        id: id.to_string(),
                    })
                })?;

            Ok(result.rows_affected() > 0)
        }
    }
}
