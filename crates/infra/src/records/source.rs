use std::sync::Arc;

use thiserror::Error;

use splitledger_balances::{Expense, Member, Settlement};
use splitledger_core::GroupId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown group: {0}")]
    UnknownGroup(GroupId),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// Read-only access to a group's raw records.
///
/// Reads are independent of each other so callers may issue them
/// concurrently. Implementations must not hold locks across `.await`.
#[async_trait::async_trait]
pub trait GroupRecordSource: Send + Sync {
    async fn group_exists(&self, group_id: GroupId) -> Result<bool, StoreError>;

    /// Current roster. Order is preserved into the balance report.
    async fn members(&self, group_id: GroupId) -> Result<Vec<Member>, StoreError>;

    async fn expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, StoreError>;

    async fn settlements(&self, group_id: GroupId) -> Result<Vec<Settlement>, StoreError>;
}

#[async_trait::async_trait]
impl<S> GroupRecordSource for Arc<S>
where
    S: GroupRecordSource + ?Sized,
{
    async fn group_exists(&self, group_id: GroupId) -> Result<bool, StoreError> {
        (**self).group_exists(group_id).await
    }

    async fn members(&self, group_id: GroupId) -> Result<Vec<Member>, StoreError> {
        (**self).members(group_id).await
    }

    async fn expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, StoreError> {
        (**self).expenses(group_id).await
    }

    async fn settlements(&self, group_id: GroupId) -> Result<Vec<Settlement>, StoreError> {
        (**self).settlements(group_id).await
    }
}
