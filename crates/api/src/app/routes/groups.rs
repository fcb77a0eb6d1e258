use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use splitledger_balances::validate_records;
use splitledger_core::GroupId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::authz::{require_member, require_on_roster};
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/groups/:group_id/members", post(add_member))
        .route("/groups/:group_id/expenses", post(record_expense))
        .route("/groups/:group_id/settlements", post(record_settlement))
        .route("/groups/:group_id/balances", get(get_balances))
}

fn parse_group_id(raw: &str) -> Result<GroupId, axum::response::Response> {
    raw.parse::<GroupId>()
        .map_err(|e| errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", e.to_string()))
}

/// Seed a group with its initial roster (dev route, no identity required).
pub async fn create_group(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateGroupRequest>,
) -> axum::response::Response {
    if body.name.trim().is_empty() {
        return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", "group name must not be empty");
    }

    let members = body.members.into_iter().map(dto::to_member).collect::<Vec<_>>();
    let group_id = match services.store.create_group(body.name.clone(), members.clone()) {
        Ok(id) => id,
        Err(e) => return errors::store_error_to_response(e),
    };

    tracing::info!(group_id = %group_id, members = members.len(), "group created");
    (
        StatusCode::CREATED,
        Json(dto::group_created_to_json(group_id, &body.name, &members)),
    )
        .into_response()
}

pub async fn add_member(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(group_id): Path<String>,
    Json(body): Json<dto::NewMemberRequest>,
) -> axum::response::Response {
    let group_id = match parse_group_id(&group_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    if let Err(e) = require_member(&services, group_id, &caller).await {
        return errors::service_error_to_response(e);
    }

    let member = dto::to_member(body);
    if let Err(e) = services.store.add_member(group_id, member.clone()) {
        return errors::store_error_to_response(e);
    }

    (StatusCode::CREATED, Json(member)).into_response()
}

pub async fn record_expense(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(group_id): Path<String>,
    Json(body): Json<dto::RecordExpenseRequest>,
) -> axum::response::Response {
    let group_id = match parse_group_id(&group_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let roster = match require_member(&services, group_id, &caller).await {
        Ok(r) => r,
        Err(e) => return errors::service_error_to_response(e),
    };

    let expense = dto::to_expense(body);
    let named = std::iter::once(&expense.payer_id).chain(expense.splits.iter().map(|s| &s.member_id));
    if let Err(e) = require_on_roster(&roster, named) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = validate_records(std::slice::from_ref(&expense), &[]) {
        return errors::domain_error_to_response(e);
    }

    let expense_id = expense.id;
    if let Err(e) = services.store.record_expense(group_id, expense) {
        return errors::store_error_to_response(e);
    }

    tracing::debug!(group_id = %group_id, expense_id = %expense_id, "expense recorded");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": expense_id.to_string() })),
    )
        .into_response()
}

pub async fn record_settlement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(group_id): Path<String>,
    Json(body): Json<dto::RecordSettlementRequest>,
) -> axum::response::Response {
    let group_id = match parse_group_id(&group_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let roster = match require_member(&services, group_id, &caller).await {
        Ok(r) => r,
        Err(e) => return errors::service_error_to_response(e),
    };

    let settlement = dto::to_settlement(body);
    if let Err(e) = require_on_roster(&roster, [&settlement.payer_id, &settlement.receiver_id]) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = validate_records(&[], std::slice::from_ref(&settlement)) {
        return errors::domain_error_to_response(e);
    }

    let settlement_id = settlement.id;
    if let Err(e) = services.store.record_settlement(group_id, settlement) {
        return errors::store_error_to_response(e);
    }

    tracing::debug!(group_id = %group_id, settlement_id = %settlement_id, "settlement recorded");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "id": settlement_id.to_string() })),
    )
        .into_response()
}

pub async fn get_balances(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(caller): Extension<CallerContext>,
    Path(group_id): Path<String>,
) -> axum::response::Response {
    let group_id = match parse_group_id(&group_id) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.balances.group_balances(group_id, caller.member_id()).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
