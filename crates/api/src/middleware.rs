use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use splitledger_core::MemberId;

use crate::context::CallerContext;

/// Header carrying the authenticated member id.
///
/// Authentication itself happens upstream (gateway / session layer); this
/// service only trusts the resolved identity.
pub const MEMBER_ID_HEADER: &str = "x-member-id";

pub async fn identity_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let member_id = extract_member_id(req.headers())?;

    req.extensions_mut().insert(CallerContext::new(member_id));

    Ok(next.run(req).await)
}

fn extract_member_id(headers: &HeaderMap) -> Result<MemberId, StatusCode> {
    let header = headers
        .get(MEMBER_ID_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let raw = header.trim();
    if raw.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    raw.parse::<MemberId>().map_err(|_| StatusCode::UNAUTHORIZED)
}
