//! `SQLite` implementation of [`MemberRepository`].

use std::future::Future;

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use carrental_app::ports::MemberRepository;
use carrental_domain::error::{ConflictError, RentalError};
use carrental_domain::id::MemberId;
use carrental_domain::member::Member;

use crate::error::{StorageError, on_foreign_key_violation, on_unique_violation};
use crate::row::parsed;

/// Wrapper for converting database rows into domain [`Member`].
struct Wrapper(Member);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Member> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self(Member {
            id: parsed(row, "id")?,
            name: row.try_get("name")?,
            address: row.try_get("address")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            driving_license_number: row.try_get("driving_license_number")?,
        }))
    }
}

const INSERT: &str = "INSERT INTO members (id, name, address, email, phone, driving_license_number) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_BY_ID: &str = "SELECT * FROM members WHERE id = ?";
const SELECT_BY_LICENSE: &str = "SELECT * FROM members WHERE driving_license_number = ?";
const SELECT_ALL: &str = "SELECT * FROM members ORDER BY name";
const UPDATE: &str = "UPDATE members SET name = ?, address = ?, email = ?, phone = ?, driving_license_number = ? WHERE id = ?";
const DELETE_BY_ID: &str = "DELETE FROM members WHERE id = ?";

/// `SQLite`-backed member repository.
pub struct SqliteMemberRepository {
    pool: SqlitePool,
}

impl SqliteMemberRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn duplicate_license(member: &Member) -> ConflictError {
    ConflictError::Duplicate {
        entity: "Member",
        field: "driving_license_number",
        value: member.driving_license_number.clone(),
    }
}

impl MemberRepository for SqliteMemberRepository {
    fn create(&self, member: Member) -> impl Future<Output = Result<Member, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(INSERT)
                .bind(member.id.to_string())
                .bind(&member.name)
                .bind(&member.address)
                .bind(&member.email)
                .bind(&member.phone)
                .bind(&member.driving_license_number)
                .execute(&pool)
                .await
                .map_err(|err| on_unique_violation(err, || duplicate_license(&member)))?;

            Ok(member)
        }
    }

    fn get_by_id(
        &self,
        id: MemberId,
    ) -> impl Future<Output = Result<Option<Member>, RentalError>> + Send {
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

    fn get_by_license_number(
        &self,
        license_number: &str,
    ) -> impl Future<Output = Result<Option<Member>, RentalError>> + Send {
        let pool = self.pool.clone();
        let license_number = license_number.to_string();
        async move {
            let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_LICENSE)
                .bind(license_number)
                .fetch_optional(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(Wrapper::maybe(row))
        }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<Member>, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().map(|w| w.0).collect())
        }
    }

    fn update(&self, member: Member) -> impl Future<Output = Result<Member, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            sqlx::query(UPDATE)
                .bind(&member.name)
                .bind(&member.address)
                .bind(&member.email)
                .bind(&member.phone)
                .bind(&member.driving_license_number)
                .bind(member.id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| on_unique_violation(err, || duplicate_license(&member)))?;

            Ok(member)
        }
    }

    fn delete(&self, id: MemberId) -> impl Future<Output = Result<bool, RentalError>> + Send {
        let pool = self.pool.clone();
        async move {
            let result = sqlx::query(DELETE_BY_ID)
                .bind(id.to_string())
                .execute(&pool)
                .await
                .map_err(|err| {
                    on_foreign_key_violation(err, || ConflictError::InUse {
                        entity: "Member",
                        id: id.to_string(),
                    })
                })?;

            Ok(result.rows_affected() > 0)
        }
    }
}
