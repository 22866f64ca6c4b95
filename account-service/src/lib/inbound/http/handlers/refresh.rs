use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;

use super::login::TokenResponseData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::errors::ErrorCode;
use crate::inbound::http::router::AppState;

pub const REFRESH_TOKEN_HEADER: &str = "Refresh-Token";

/// Exchange the refresh token carried in the `Refresh-Token` header for a
/// new token pair.
pub async fn refresh<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let token = refresh_token_from_headers(&headers)?;

    state
        .auth_service
        .refresh(token)
        .await
        .map_err(ApiError::from)
        .map(|ref tokens| {
            ApiSuccess::with_message(StatusCode::OK, tokens.into(), "Tokens reissued")
        })
}

fn refresh_token_from_headers(headers: &HeaderMap) -> Result<&str, ApiError> {
    let value = headers.get(REFRESH_TOKEN_HEADER).ok_or_else(|| {
        ApiError::new(
            ErrorCode::InvalidInputValue,
            "Missing Refresh-Token header",
        )
    })?;

    let token = value.to_str().map_err(|_| {
        ApiError::new(
            ErrorCode::InvalidInputValue,
            "Invalid Refresh-Token header",
        )
    })?;

    // Tolerate clients that send the refresh token with the bearer scheme
    Ok(token.strip_prefix("Bearer ").unwrap_or(token).trim())
}
