//! API-side access guard for group routes.
//!
//! Reads and writes share one rule: the caller must be on the group roster.
//! The balance service enforces it for reads; write handlers call
//! [`require_member`] before touching the store.

use splitledger_balances::Member;
use splitledger_core::{DomainError, GroupId, MemberId};
use splitledger_infra::ServiceError;

use crate::app::services::AppServices;
use crate::context::CallerContext;

/// Current roster of `group_id` if the caller belongs to it.
pub async fn require_member(
    services: &AppServices,
    group_id: GroupId,
    caller: &CallerContext,
) -> Result<Vec<Member>, ServiceError> {
    services.balances.authorize(group_id, caller.member_id()).await
}

/// Every id in `ids` must be on the roster (new records may only name current members).
pub fn require_on_roster<'a>(
    roster: &[Member],
    ids: impl IntoIterator<Item = &'a MemberId>,
) -> Result<(), DomainError> {
    for id in ids {
        if !roster.iter().any(|m| &m.id == id) {
            return Err(DomainError::validation(format!("{id} is not a member of this group")));
        }
    }
    Ok(())
}
