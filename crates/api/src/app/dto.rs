use chrono::{DateTime, Utc};
use serde::Deserialize;

use splitledger_balances::{Expense, Member, Settlement, Split};
use splitledger_core::{ExpenseId, GroupId, MemberId, Money, SettlementId};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMemberRequest {
    pub name: String,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(default)]
    pub members: Vec<NewMemberRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitRequest {
    pub member_id: MemberId,
    /// Minor units (cents).
    pub amount: i64,
    #[serde(default)]
    pub settled: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordExpenseRequest {
    pub payer_id: MemberId,
    pub amount: i64,
    #[serde(default)]
    pub description: String,
    /// Defaults to the time the request is handled.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    pub splits: Vec<SplitRequest>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSettlementRequest {
    pub payer_id: MemberId,
    pub receiver_id: MemberId,
    pub amount: i64,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

// -------------------------
// Domain mapping helpers
// -------------------------

pub fn to_member(body: NewMemberRequest) -> Member {
    Member {
        id: MemberId::new(),
        name: body.name,
        image_url: body.image_url,
    }
}

pub fn to_expense(body: RecordExpenseRequest) -> Expense {
    Expense {
        id: ExpenseId::new(),
        payer_id: body.payer_id,
        amount: Money::from_minor(body.amount),
        description: body.description,
        occurred_at: body.occurred_at.unwrap_or_else(Utc::now),
        splits: body
            .splits
            .into_iter()
            .map(|s| Split {
                member_id: s.member_id,
                amount: Money::from_minor(s.amount),
                settled: s.settled,
            })
            .collect(),
    }
}

pub fn to_settlement(body: RecordSettlementRequest) -> Settlement {
    Settlement {
        id: SettlementId::new(),
        payer_id: body.payer_id,
        receiver_id: body.receiver_id,
        amount: Money::from_minor(body.amount),
        occurred_at: body.occurred_at.unwrap_or_else(Utc::now),
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn group_created_to_json(group_id: GroupId, name: &str, members: &[Member]) -> serde_json::Value {
    serde_json::json!({
        "id": group_id.to_string(),
        "name": name,
        "members": members,
    })
}
