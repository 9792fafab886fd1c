//! Member repository port.

use std::future::Future;

use carrental_domain::error::RentalError;
use carrental_domain::id::MemberId;
use carrental_domain::member::Member;

/// Repository for persisting and querying [`Member`]s.
pub trait MemberRepository {
    /// Create a new member. A license number already in use is a conflict.
    fn create(&self, member: Member) -> impl Future<Output = Result<Member, RentalError>> + Send;

    fn get_by_id(
        &self,
        id: MemberId,
    ) -> impl Future<Output = Result<Option<Member>, RentalError>> + Send;

    /// Look up a member by driving license number.
    fn get_by_license_number(
        &self,
        license_number: &str,
    ) -> impl Future<Output = Result<Option<Member>, RentalError>> + Send;

    fn get_all(&self) -> impl Future<Output = Result<Vec<Member>, RentalError>> + Send;

    fn update(&self, member: Member) -> impl Future<Output = Result<Member, RentalError>> + Send;

    /// Delete a member by id. Returns `false` when no row matched.
    fn delete(&self, id: MemberId) -> impl Future<Output = Result<bool, RentalError>> + Send;
}
