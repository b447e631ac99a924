//! Name search over the member list.

use crate::models::MemberRecord;
use crate::utils::contains_ignore_case;

/// Members whose full name contains `query`, case-insensitively, in their
/// original order. An empty query matches everything.
pub fn filter_members<'a>(members: &'a [MemberRecord], query: &str) -> Vec<&'a MemberRecord> {
    members.iter().filter(|m| matches_query(m, query)).collect()
}

pub fn matches_query(member: &MemberRecord, query: &str) -> bool {
    query.is_empty() || contains_ignore_case(member.display_name(), query)
}
