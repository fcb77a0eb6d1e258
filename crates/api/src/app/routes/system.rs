use axum::{http::StatusCode, response::IntoResponse, Json};

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(
    axum::extract::Extension(caller): axum::extract::Extension<crate::context::CallerContext>,
) -> impl IntoResponse {
    Json(serde_json::json!({
        "member_id": caller.member_id().to_string(),
    }))
}
