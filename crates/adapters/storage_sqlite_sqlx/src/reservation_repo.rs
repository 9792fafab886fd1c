//! `SQLite` implementation of [`ReservationRepository`].
//!
//! Reservation rows carry foreign keys to cars, members and locations.
//! Attached extras live in two join tables that cascade on reservation delete.
//! Every write that moves a car's status runs in one transaction together
//! with the reservation write.

use std::collections::BTreeSet;
use std::future::Future;
use std::str::FromStr;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};

use carrental_app::ports::ReservationRepository;
use carrental_domain::car::Car;
use carrental_domain::error::{ConflictError, NotFoundError, RentalError};
use carrental_domain::id::{AdditionalServiceId, EquipmentId, ReservationId};
use carrental_domain::reservation::{Reservation, ReservationNumber};
use carrental_domain::time::{Timestamp, to_sortable};

use crate::error::{StorageError, decode_error, is_foreign_key_violation, on_unique_violation};
use crate::row::parsed;

/// Wrapper for converting database rows into domain [`Reservation`].
///
/// Extras are not part of the row; [`load_extras`] fills them in.
struct Wrapper(Reservation);

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let number: String = row.try_get("number")?;

        Ok(Self(Reservation {
            id: parsed(row, "id")?,
            number: ReservationNumber::from(number),
            car_id: parsed(row, "car_id")?,
            member_id: parsed(row, "member_id")?,
            pick_up_location_id: parsed(row, "pick_up_location_id")?,
            drop_off_location_id: parsed(row, "drop_off_location_id")?,
            day_count: row.try_get("day_count")?,
            created_at: parsed(row, "created_at")?,
            pick_up_at: parsed(row, "pick_up_at")?,
            drop_off_at: parsed(row, "drop_off_at")?,
            status: parsed(row, "status")?,
            equipment_ids: BTreeSet::new(),
            service_ids: BTreeSet::new(),
        }))
    }
}

const INSERT: &str = "INSERT INTO reservations (id, number, car_id, member_id, pick_up_location_id, drop_off_location_id, day_count, created_at, pick_up_at, drop_off_at, status) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM reservations WHERE id = ?";
const SELECT_BY_NUMBER: &str = "SELECT * FROM reservations WHERE number = ?";
const SELECT_ALL: &str = "SELECT * FROM reservations ORDER BY created_at";
const SELECT_CREATED_BETWEEN: &str =
    "SELECT * FROM reservations WHERE created_at BETWEEN ? AND ? ORDER BY created_at";
const CLOSE: &str = "UPDATE reservations SET status = ? WHERE id = ? AND status = 'ACTIVE'";
const SELECT_STATUS: &str = "SELECT status FROM reservations WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM reservations WHERE id = ?";

const RESERVE_CAR: &str =
    "UPDATE cars SET status = 'RESERVED' WHERE id = ? AND status = 'AVAILABLE'";
const SELECT_CAR_STATUS: &str = "SELECT status FROM cars WHERE id = ?";
const UPDATE_CAR_STATUS: &str = "UPDATE cars SET status = ? WHERE id = ?";
const SELECT_MEMBER_EXISTS: &str = "SELECT 1 FROM members WHERE id = ?";
const SELECT_LOCATION_EXISTS: &str = "SELECT 1 FROM locations WHERE id = ?";

const INSERT_EQUIPMENT: &str =
    "INSERT OR IGNORE INTO reservation_equipment (reservation_id, equipment_id) VALUES (?, ?)";
const INSERT_SERVICE: &str =
    "INSERT OR IGNORE INTO reservation_services (reservation_id, service_id) VALUES (?, ?)";
const SELECT_EQUIPMENT_IDS: &str =
    "SELECT equipment_id FROM reservation_equipment WHERE reservation_id = ?";
const SELECT_SERVICE_IDS: &str =
    "SELECT service_id FROM reservation_services WHERE reservation_id = ?";

/// `SQLite`-backed reservation repository.
pub struct SqliteReservationRepository {
    pool: SqlitePool,
}

impl SqliteReservationRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn parse_ids<T>(column: &'static str, raw: &[String]) -> Result<BTreeSet<T>, sqlx::Error>
where
    T: FromStr + Ord,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.iter()
        .map(|value| value.parse().map_err(|err| decode_error(column, err)))
        .collect()
}

/// Fill in the equipment and service sets of freshly decoded reservations.
async fn load_extras(
    pool: &SqlitePool,
    rows: Vec<Wrapper>,
) -> Result<Vec<Reservation>, sqlx::Error> {
    let mut reservations = Vec::with_capacity(rows.len());
    for Wrapper(mut reservation) in rows {
        let id = reservation.id.to_string();
        let equipment: Vec<String> = sqlx::query_scalar(SELECT_EQUIPMENT_IDS)
            .bind(&id)
            .fetch_all(pool)
            .await?;
        let services: Vec<String> = sqlx::query_scalar(SELECT_SERVICE_IDS)
            .bind(&id)
            .fetch_all(pool)
            .await?;
        reservation.equipment_ids = parse_ids("equipment_id", &equipment)?;
        reservation.service_ids = parse_ids("service_id", &services)?;
        reservations.push(reservation);
    }
    Ok(reservations)
}

/// Name the member or location that disappeared after the service looked it
/// up, when the reservation insert trips a foreign key.
async fn missing_reference(
    conn: &mut SqliteConnection,
    reservation: &Reservation,
    err: sqlx::Error,
) -> RentalError {
    let references = [
        ("Member", SELECT_MEMBER_EXISTS, reservation.member_id.to_string()),
        (
            "Location",
            SELECT_LOCATION_EXISTS,
            reservation.pick_up_location_id.to_string(),
        ),
        (
            "Location",
            SELECT_LOCATION_EXISTS,
            reservation.drop_off_location_id.to_string(),
        ),
    ];
    for (entity, query, id) in references {
        let found: Result<Option<i64>, sqlx::Error> = sqlx::query_scalar(query)
            .bind(&id)
            .fetch_optional(&mut *conn)
            .await;
        match found {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!(entity, %id, "reference removed before the reservation was stored");
                return NotFoundError { entity, id }.into();
            }
            Err(lookup) => return StorageError::from(lookup).into(),
        }
    }
    StorageError::from(err).into()
}

impl ReservationRepository for SqliteReservationRepository {
    fn create(
        &self,
        reservation: Reservation,
        car: &Car,
    ) -> impl Future<Output = Result<Reservation, RentalError>> + Send {
        let pool = self.pool.clone();
        let car_id = car.id.to_string();
        let barcode = car.barcode.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let reserved = sqlx::query(RESERVE_CAR)
                .bind(&car_id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            if reserved.rows_affected() == 0 {
                let status: Option<String> = sqlx::query_scalar(SELECT_CAR_STATUS)
                    .bind(&car_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
                tracing::warn!(%barcode, "car was taken before the reservation was stored");
                return Err(ConflictError::CarUnavailable {
                    barcode,
                    status: status.unwrap_or_else(|| "DELETED".to_string()),
                }
                .into());
            }

            let id = reservation.id.to_string();
            let inserted = sqlx::query(INSERT)
                .bind(&id)
                .bind(reservation.number.as_str())
                .bind(&car_id)
                .bind(reservation.member_id.to_string())
                .bind(reservation.pick_up_location_id.to_string())
                .bind(reservation.drop_off_location_id.to_string())
                .bind(reservation.day_count)
                .bind(to_sortable(reservation.created_at))
                .bind(to_sortable(reservation.pick_up_at))
                .bind(to_sortable(reservation.drop_off_at))
                .bind(reservation.status.as_str())
                .execute(&mut *tx)
                .await;
            if let Err(err) = inserted {
                if is_foreign_key_violation(&err) {
                    return Err(missing_reference(&mut tx, &reservation, err).await);
                }
                return Err(on_unique_violation(err, || ConflictError::Duplicate {
                    entity: "Reservation",
                    field: "number",
                    value: reservation.number.to_string(),
                }));
            }

            for equipment_id in &reservation.equipment_ids {
                sqlx::query(INSERT_EQUIPMENT)
                    .bind(&id)
                    .bind(equipment_id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }
            for service_id in &reservation.service_ids {
                sqlx::query(INSERT_SERVICE)
                    .bind(&id)
                    .bind(service_id.to_string())
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            tx.commit().await.map_err(StorageError::from)?;
            Ok(reservation)
        }
    }

    fn get_by_id(
        &self,
        id: ReservationId,
    ) -> impl Future<Output = Result<Option<Reservation>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
                .bind(id.to_string())
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let loaded = load_extras(&pool, row.into_iter().collect())
                .await
                .map_err(StorageError::from)?;
            Ok(loaded.into_iter().next())
        }
    }

    fn get_by_number(
        &self,
        number: &ReservationNumber,
    ) -> impl Future<Output = Result<Option<Reservation>, RentalError>> + Send {
        let pool = self.pool.clone();
        let number = number.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NUMBER)
                .bind(number)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            let loaded = load_extras(&pool, row.into_iter().collect())
                .await
                .map_err(StorageError::from)?;
            Ok(loaded.into_iter().next())
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Reservation>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let reservations = load_extras(&pool, rows)
                .await
                .map_err(StorageError::from)?;
            Ok(reservations)
        }
    }

    fn find_created_between(
        &self,
        start: Timestamp,
        end: Timestamp,
    ) -> impl Future<Output = Result<Vec<Reservation>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_CREATED_BETWEEN)
                .bind(to_sortable(start))
                .bind(to_sortable(end))
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            let reservations = load_extras(&pool, rows)
                .await
                .map_err(StorageError::from)?;
            Ok(reservations)
        }
    }

    fn update_status(
        &self,
        reservation: &Reservation,
        car: &Car,
    ) -> impl Future<Output = Result<(), RentalError>> + Send {
        let pool = self.pool.clone();
        let reservation_id = reservation.id.to_string();
        let reservation_status = reservation.status;
        let car_id = car.id.to_string();
        let car_status = car.status;
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            let closed = sqlx::query(CLOSE)
                .bind(reservation_status.as_str())
                .bind(&reservation_id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;
            if closed.rows_affected() == 0 {
                let current: Option<String> = sqlx::query_scalar(SELECT_STATUS)
                    .bind(&reservation_id)
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
                tracing::warn!(%reservation_id, "reservation was closed before the status write");
                return Err(ConflictError::InvalidTransition {
                    entity: "Reservation",
                    from: current.unwrap_or_else(|| "DELETED".to_string()),
                    to: reservation_status.to_string(),
                }
                .into());
            }
            sqlx::query(UPDATE_CAR_STATUS)
                .bind(car_status.as_str())
                .bind(car_id)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            tx.commit().await.map_err(StorageError::from)?;
            Ok(())
        }
    }

    fn attach_equipment(
        &self,
        id: ReservationId,
        equipment_id: EquipmentId,
    ) -> impl Future<Output = Result<(), RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_EQUIPMENT)
                .bind(id.to_string())
                .bind(equipment_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn attach_service(
        &self,
        id: ReservationId,
        service_id: AdditionalServiceId,
    ) -> impl Future<Output = Result<(), RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT_SERVICE)
                .bind(id.to_string())
                .bind(service_id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(())
        }
    }

    fn delete(&self, id: ReservationId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(result.rows_affected() > 0)
        }
    }
}
