use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use splitledger_core::DomainError;
use splitledger_infra::{ServiceError, StoreError};

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(e) => domain_error_to_response(e),
        ServiceError::Store(e) => store_error_to_response(e),
        ServiceError::Timeout(limit) => json_error(
            StatusCode::GATEWAY_TIMEOUT,
            "gather_timeout",
            format!("reading group records took longer than {}ms", limit.as_millis()),
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", message),
        DomainError::Unauthorized => json_error(StatusCode::FORBIDDEN, "unauthorized", message),
        DomainError::Validation(_) => json_error(StatusCode::BAD_REQUEST, "validation_error", message),
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::DataIntegrity(_) => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "data_integrity", message)
        }
        DomainError::Overpayment { .. } => {
            json_error(StatusCode::UNPROCESSABLE_ENTITY, "overpayment", message)
        }
        DomainError::InvariantViolation(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "invariant_violation", message)
        }
        DomainError::Overflow(_) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "overflow", message),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::UnknownGroup(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        StoreError::Unavailable(_) | StoreError::Poisoned => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", err.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
