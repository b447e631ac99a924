use std::future::Future;

use crate::models::{MemberId, MemberRecord};

use super::ApiError;

/// The remote member store, as seen by the form reconciler and detail lookup.
///
/// `ApiClient` is the HTTP implementation; tests substitute an in-memory one.
pub trait MemberStore: Send + Sync {
    fn list_members(&self) -> impl Future<Output = Result<Vec<MemberRecord>, ApiError>> + Send;

    /// Create a member from a record without an id; returns it with the assigned id.
    fn create_member(
        &self,
        member: &MemberRecord,
    ) -> impl Future<Output = Result<MemberRecord, ApiError>> + Send;

    fn get_member(
        &self,
        id: &MemberId,
    ) -> impl Future<Output = Result<MemberRecord, ApiError>> + Send;

    fn delete_member(&self, id: &MemberId) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Drop a deleted member from the locally loaded list.
/// Call only after the store acknowledged the delete.
pub fn remove_member(members: &mut Vec<MemberRecord>, id: &MemberId) -> Option<MemberRecord> {
    let pos = members.iter().position(|m| m.id.as_ref() == Some(id))?;
    Some(members.remove(pos))
}
