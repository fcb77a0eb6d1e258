use std::collections::HashMap;
use std::sync::RwLock;

use splitledger_balances::{Expense, Member, Settlement};
use splitledger_core::{GroupId, MemberId};

use super::source::{GroupRecordSource, StoreError};

#[derive(Debug, Clone, Default)]
struct GroupRecords {
    name: String,
    members: Vec<Member>,
    expenses: Vec<Expense>,
    settlements: Vec<Settlement>,
}

/// In-memory group store.
///
/// Intended for tests/dev. Writes append; nothing is ever rewritten, so a
/// balance request always sees a consistent snapshot per record kind.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    groups: RwLock<HashMap<GroupId, GroupRecords>>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_group(&self, name: impl Into<String>, members: Vec<Member>) -> Result<GroupId, StoreError> {
        let group_id = GroupId::new();
        self.insert_group(group_id, name, members)?;
        Ok(group_id)
    }

    /// Insert (or replace) a group under a caller-chosen id.
    pub fn insert_group(
        &self,
        group_id: GroupId,
        name: impl Into<String>,
        members: Vec<Member>,
    ) -> Result<(), StoreError> {
        let mut groups = self.groups.write().map_err(|_| StoreError::Poisoned)?;
        groups.insert(
            group_id,
            GroupRecords {
                name: name.into(),
                members,
                ..GroupRecords::default()
            },
        );
        Ok(())
    }

    pub fn group_name(&self, group_id: GroupId) -> Result<String, StoreError> {
        self.read(group_id, |g| g.name.clone())
    }

    pub fn add_member(&self, group_id: GroupId, member: Member) -> Result<(), StoreError> {
        self.write(group_id, |g| g.members.push(member))
    }

    /// Remove a member from the roster; their past splits stay recorded.
    pub fn remove_member(&self, group_id: GroupId, member_id: MemberId) -> Result<bool, StoreError> {
        self.write(group_id, |g| {
            let before = g.members.len();
            g.members.retain(|m| m.id != member_id);
            g.members.len() != before
        })
    }

    pub fn record_expense(&self, group_id: GroupId, expense: Expense) -> Result<(), StoreError> {
        self.write(group_id, |g| g.expenses.push(expense))
    }

    pub fn record_settlement(&self, group_id: GroupId, settlement: Settlement) -> Result<(), StoreError> {
        self.write(group_id, |g| g.settlements.push(settlement))
    }

    fn read<T>(&self, group_id: GroupId, f: impl FnOnce(&GroupRecords) -> T) -> Result<T, StoreError> {
        let groups = self.groups.read().map_err(|_| StoreError::Poisoned)?;
        groups
            .get(&group_id)
            .map(f)
            .ok_or(StoreError::UnknownGroup(group_id))
    }

    fn write<T>(&self, group_id: GroupId, f: impl FnOnce(&mut GroupRecords) -> T) -> Result<T, StoreError> {
        let mut groups = self.groups.write().map_err(|_| StoreError::Poisoned)?;
        groups
            .get_mut(&group_id)
            .map(f)
            .ok_or(StoreError::UnknownGroup(group_id))
    }
}

#[async_trait::async_trait]
impl GroupRecordSource for InMemoryGroupStore {
    async fn group_exists(&self, group_id: GroupId) -> Result<bool, StoreError> {
        let groups = self.groups.read().map_err(|_| StoreError::Poisoned)?;
        Ok(groups.contains_key(&group_id))
    }

    async fn members(&self, group_id: GroupId) -> Result<Vec<Member>, StoreError> {
        self.read(group_id, |g| g.members.clone())
    }

    async fn expenses(&self, group_id: GroupId) -> Result<Vec<Expense>, StoreError> {
        self.read(group_id, |g| g.expenses.clone())
    }

    async fn settlements(&self, group_id: GroupId) -> Result<Vec<Settlement>, StoreError> {
        self.read(group_id, |g| g.settlements.clone())
    }
}
