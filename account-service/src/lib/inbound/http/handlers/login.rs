use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::TokenPair;
use crate::domain::account::ports::AuthServicePort;
use crate::inbound::http::router::AppState;

pub async fn login<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .login(body.into_command())
        .await
        .map_err(ApiError::from)
        .map(|ref tokens| {
            ApiSuccess::with_message(StatusCode::OK, tokens.into(), "Login succeeded")
        })
}

#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl LoginRequest {
    fn into_command(self) -> LoginCommand {
        LoginCommand {
            email: self.email.trim().to_string(),
            password: self.password,
        }
    }
}

/// Token pair as returned by login and refresh
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Milliseconds until the access token expires
    pub expires_in: i64,
}

impl From<&TokenPair> for TokenResponseData {
    fn from(tokens: &TokenPair) -> Self {
        Self {
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            token_type: tokens.token_type.to_string(),
            expires_in: tokens.expires_in,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_trimmed() {
        let request: LoginRequest = serde_json::from_value(serde_json::json!({
            "email": "  ann@example.com ",
            "password": "password123"
        }))
        .unwrap();

        let command = request.into_command();
        assert_eq!(command.email, "ann@example.com");
        assert_eq!(command.password, "password123");
    }

    #[test]
    fn test_debug_hides_password() {
        let request = LoginRequest {
            email: "ann@example.com".to_string(),
            password: "hunter2hunter2".to_string(),
        };

        assert!(!format!("{:?}", request).contains("hunter2"));
    }
}
