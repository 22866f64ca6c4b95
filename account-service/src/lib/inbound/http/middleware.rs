use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use super::handlers::ApiError;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::errors::ErrorCode;
use crate::inbound::http::router::AppState;

/// Middleware that validates the bearer access token and stores the
/// resulting [`auth::Principal`] in the request extensions.
///
/// Refresh tokens carry no authorities and are rejected here.
pub async fn authenticate<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req)?;

    let principal = state.tokens.principal(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        ApiError::new(ErrorCode::Unauthorized, "Invalid or expired token")
    })?;

    tracing::debug!(subject = %principal.subject(), "Request authenticated");
    req.extensions_mut().insert(principal);

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, ApiError> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(|| ApiError::new(ErrorCode::Unauthorized, "Missing Authorization header"))?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| ApiError::new(ErrorCode::Unauthorized, "Invalid Authorization header"))?;

    auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::new(
            ErrorCode::Unauthorized,
            "Invalid Authorization header format. Expected: Bearer <token>",
        )
    })
}
