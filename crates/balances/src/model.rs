//! Input records consumed by the balance pipeline.
//!
//! These are plain data: how an expense was split (equal, percentage, exact)
//! was decided upstream, and membership/authorization were checked by the
//! caller before these records reach the engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitledger_core::{Entity, ExpenseId, MemberId, Money, SettlementId};

/// A group member as supplied by the roster.
///
/// `name` and `image_url` are carried through to the report untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Member {
    pub fn new(id: MemberId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image_url: None,
        }
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl Entity for Member {
    type Id = MemberId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One member's share of an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub member_id: MemberId,
    /// Share in minor units; expected non-negative.
    pub amount: Money,
    /// Already repaid out of band; contributes nothing.
    #[serde(default)]
    pub settled: bool,
}

impl Split {
    pub fn new(member_id: MemberId, amount: Money) -> Self {
        Self {
            member_id,
            amount,
            settled: false,
        }
    }

    pub fn settled(mut self) -> Self {
        self.settled = true;
        self
    }

    /// Whether this split creates a debt towards `payer_id`.
    pub fn is_outstanding_for(&self, payer_id: MemberId) -> bool {
        !self.settled && self.member_id != payer_id
    }
}

/// An expense paid by one member and shared among several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub payer_id: MemberId,
    pub amount: Money,
    #[serde(default)]
    pub description: String,
    pub occurred_at: DateTime<Utc>,
    pub splits: Vec<Split>,
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A repayment: `payer_id` transferred `amount` to `receiver_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: SettlementId,
    pub payer_id: MemberId,
    pub receiver_id: MemberId,
    pub amount: Money,
    pub occurred_at: DateTime<Utc>,
}

impl Entity for Settlement {
    type Id = SettlementId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
