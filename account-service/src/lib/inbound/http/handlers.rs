use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::errors::ErrorCode;

pub mod health;
pub mod login;
pub mod me;
pub mod refresh;
pub mod signup;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }

    /// Success carrying a human-readable confirmation next to the data.
    pub fn with_message(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        let mut body = ApiResponseBody::new(status, data);
        body.message = Some(message.into());
        ApiSuccess(status, Json(body))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

/// Failure rendered at the HTTP boundary: a taxonomy entry plus a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Error carrying the taxonomy's default message.
    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code, code.message())
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status();

        (
            status,
            Json(ApiResponseBody::new_error(status, self.code, self.message)),
        )
            .into_response()
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        let code = err.error_code();

        match code {
            // Infrastructure details stay in the logs
            ErrorCode::InternalServerError => {
                tracing::error!(error = %err, "Request failed");
                ApiError::from_code(code)
            }
            _ => ApiError::new(code, err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::new(ErrorCode::InvalidInputValue, rejection.body_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message: None,
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, code: ErrorCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            message: None,
            data: ApiErrorData {
                code: code.code().to_string(),
                message,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_keep_their_message() {
        let err = ApiError::from(AccountError::DuplicateEmail("a@x.com".to_string()));

        assert_eq!(err.code(), ErrorCode::DuplicateEmail);
        assert_eq!(err.message, "Email already exists: a@x.com");
    }

    #[test]
    fn test_internal_errors_are_masked() {
        let err = ApiError::from(AccountError::DatabaseError(
            "password authentication failed for user postgres".to_string(),
        ));

        assert_eq!(err.code(), ErrorCode::InternalServerError);
        assert_eq!(err.message, "Internal server error");
    }

    #[test]
    fn test_success_message_is_optional() {
        let plain = serde_json::to_value(ApiResponseBody::new(StatusCode::OK, 1)).unwrap();
        assert!(plain.get("message").is_none());

        let ApiSuccess(_, Json(body)) =
            ApiSuccess::with_message(StatusCode::CREATED, 1, "Sign-up completed");
        let with_message = serde_json::to_value(body).unwrap();
        assert_eq!(with_message["message"], "Sign-up completed");
        assert_eq!(with_message["status_code"], 201);
    }

    #[test]
    fn test_error_response_status() {
        let response = ApiError::from_code(ErrorCode::Unauthorized).into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = ApiError::from(AccountError::UserNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
