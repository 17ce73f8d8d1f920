//! services/api/src/web/middleware.rs
//!
//! Owner resolution for plan, template and favorite routes.

use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use meal_planner_core::OwnerKey;
use tracing::debug;
use uuid::Uuid;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Middleware that decides whose data a request works on.
///
/// A valid `x-user-id` UUID selects that user's data; without the header the request
/// works on the anonymous `local` owner. A malformed header returns 400.
pub async fn resolve_owner(mut req: Request, next: Next) -> Result<Response, (StatusCode, String)> {
    let owner = match req.headers().get(USER_ID_HEADER) {
        None => OwnerKey::Local,
        Some(value) => {
            let user_id = value
                .to_str()
                .ok()
                .and_then(|v| Uuid::parse_str(v.trim()).ok())
                .ok_or_else(|| {
                    (
                        StatusCode::BAD_REQUEST,
                        "Invalid x-user-id format".to_string(),
                    )
                })?;
            OwnerKey::User(user_id)
        }
    };

    debug!(owner = %owner, "Request owner resolved");
    req.extensions_mut().insert(owner);
    Ok(next.run(req).await)
}
