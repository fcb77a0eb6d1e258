//! Balance request orchestration: gather records, check access, compute.
//!
//! ```text
//! group_balances(group, caller)
//!   ↓
//! 1. group exists?                      (NotFound otherwise)
//!   ↓
//! 2. roster ∥ expenses ∥ settlements    (concurrent reads, one timeout)
//!   ↓
//! 3. caller in roster?                  (Unauthorized otherwise)
//!   ↓
//! 4. validate_records                   (DataIntegrity)
//!   ↓
//! 5. BalanceEngine::compute             (pure, synchronous)
//! ```
//!
//! Steps 1-3 are the gather phase; nothing is computed until every read has
//! completed, and no partial report is ever returned.

use std::time::Duration;

use thiserror::Error;

use splitledger_balances::{BalanceEngine, BalanceReport, Expense, Member, Settlement, validate_records};
use splitledger_core::{DomainError, GroupId, MemberId};

use crate::config::BalanceConfig;
use crate::records::{GroupRecordSource, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(StoreError),

    #[error("gathering group records timed out after {0:?}")]
    Timeout(Duration),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            // The group vanished between the existence check and the read.
            StoreError::UnknownGroup(_) => ServiceError::Domain(DomainError::NotFound),
            other => ServiceError::Store(other),
        }
    }
}

/// Records of one group, read in a single gather pass.
#[derive(Debug, Clone)]
pub struct GroupSnapshot {
    pub roster: Vec<Member>,
    pub expenses: Vec<Expense>,
    pub settlements: Vec<Settlement>,
}

/// Computes balance reports for group members.
#[derive(Debug)]
pub struct BalanceService<S> {
    source: S,
    config: BalanceConfig,
    engine: BalanceEngine,
}

impl<S> BalanceService<S>
where
    S: GroupRecordSource,
{
    pub fn new(source: S, config: BalanceConfig) -> Self {
        Self {
            source,
            engine: BalanceEngine::new(config.overpayment_policy),
            config,
        }
    }

    pub fn config(&self) -> &BalanceConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Full report for `group_id`, as seen by `caller`.
    pub async fn group_balances(&self, group_id: GroupId, caller: MemberId) -> Result<BalanceReport, ServiceError> {
        let snapshot = self.gather(group_id, caller).await.inspect_err(|e| {
            tracing::warn!(group_id = %group_id, caller = %caller, error = %e, "balance gather failed");
        })?;

        validate_records(&snapshot.expenses, &snapshot.settlements)?;

        let report = self
            .engine
            .compute(&snapshot.roster, &snapshot.expenses, &snapshot.settlements)?;

        tracing::info!(
            group_id = %group_id,
            members = report.members.len(),
            expenses = snapshot.expenses.len(),
            settlements = snapshot.settlements.len(),
            "balance report computed"
        );
        Ok(report)
    }

    /// Roster of `group_id` if `caller` belongs to it.
    ///
    /// Used by write paths that need the same access rule as reads.
    pub async fn authorize(&self, group_id: GroupId, caller: MemberId) -> Result<Vec<Member>, ServiceError> {
        self.with_timeout(async {
            self.ensure_group(group_id).await?;
            let roster = self.source.members(group_id).await?;
            ensure_member(&roster, caller)?;
            Ok::<_, ServiceError>(roster)
        })
        .await
    }

    /// Gather phase: every read completes (or fails) before compute starts.
    pub async fn gather(&self, group_id: GroupId, caller: MemberId) -> Result<GroupSnapshot, ServiceError> {
        self.with_timeout(async {
            self.ensure_group(group_id).await?;

            let (roster, expenses, settlements) = tokio::try_join!(
                self.source.members(group_id),
                self.source.expenses(group_id),
                self.source.settlements(group_id),
            )?;

            ensure_member(&roster, caller)?;

            Ok::<_, ServiceError>(GroupSnapshot {
                roster,
                expenses,
                settlements,
            })
        })
        .await
    }

    async fn ensure_group(&self, group_id: GroupId) -> Result<(), ServiceError> {
        if self.source.group_exists(group_id).await? {
            Ok(())
        } else {
            Err(DomainError::not_found().into())
        }
    }

    async fn with_timeout<T>(
        &self,
        fut: impl Future<Output = Result<T, ServiceError>>,
    ) -> Result<T, ServiceError> {
        let limit = self.config.gather_timeout;
        tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| ServiceError::Timeout(limit))?
    }
}

fn ensure_member(roster: &[Member], caller: MemberId) -> Result<(), ServiceError> {
    if roster.iter().any(|m| m.id == caller) {
        Ok(())
    } else {
        Err(DomainError::Unauthorized.into())
    }
}
