use std::fmt;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::NicknameError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::models::AccountSummary;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::Password;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::errors::ErrorCode;
use crate::inbound::http::router::AppState;

pub async fn signup<S: AuthServicePort>(
    State(state): State<AppState<S>>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<ApiSuccess<SignupResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref summary| {
            ApiSuccess::with_message(StatusCode::CREATED, summary.into(), "Sign-up completed")
        })
}

/// HTTP request body for signing up (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignupRequest {
    email: String,
    password: String,
    nickname: String,
}

impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("nickname", &self.nickname)
            .finish()
    }
}

#[derive(Debug, Clone, Error)]
enum ParseSignupRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid nickname: {0}")]
    Nickname(#[from] NicknameError),
}

impl SignupRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ParseSignupRequestError> {
        let email = EmailAddress::new(self.email)?;
        let password = Password::new(self.password)?;
        let nickname = Nickname::new(self.nickname)?;
        Ok(RegisterCommand::new(email, password, nickname))
    }
}

impl From<ParseSignupRequestError> for ApiError {
    fn from(err: ParseSignupRequestError) -> Self {
        ApiError::new(ErrorCode::InvalidInputValue, err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupResponseData {
    pub id: i64,
    pub email: String,
    pub nickname: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountSummary> for SignupResponseData {
    fn from(summary: &AccountSummary) -> Self {
        Self {
            id: summary.id.0,
            email: summary.email.clone(),
            nickname: summary.nickname.clone(),
            role: summary.role.as_str().to_string(),
            created_at: summary.created_at,
        }
    }
}
