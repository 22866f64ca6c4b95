use auth::AuthenticationError;
use auth::JwtError;
use auth::PasswordError;
use thiserror::Error;

use crate::domain::errors::ErrorCode;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),

    #[error("Email too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Nickname validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NicknameError {
    #[error("Nickname must not be blank")]
    Blank,

    #[error("Nickname too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for raw password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Role parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role: {0}")]
    Unknown(String),
}

/// Top-level error for all account and authentication operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid nickname: {0}")]
    InvalidNickname(#[from] NicknameError),

    #[error("Invalid password: {0}")]
    WeakPassword(#[from] PasswordPolicyError),

    #[error("Invalid role: {0}")]
    InvalidRole(#[from] RoleError),

    // Domain-level errors
    #[error("Email already exists: {0}")]
    DuplicateEmail(String),

    #[error("Nickname already exists: {0}")]
    DuplicateNickname(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Unauthorized")]
    Unauthorized,

    // Infrastructure errors
    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl AccountError {
    /// Taxonomy entry this failure is reported as.
    pub fn error_code(&self) -> ErrorCode {
        match self {
            AccountError::InvalidEmail(_)
            | AccountError::InvalidNickname(_)
            | AccountError::WeakPassword(_) => ErrorCode::InvalidInputValue,
            AccountError::InvalidRole(_) => ErrorCode::InvalidTypeValue,
            AccountError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            AccountError::DuplicateNickname(_) => ErrorCode::DuplicateNickname,
            AccountError::UserNotFound => ErrorCode::UserNotFound,
            AccountError::InvalidPassword => ErrorCode::InvalidPassword,
            AccountError::Unauthorized => ErrorCode::Unauthorized,
            AccountError::Hashing(_)
            | AccountError::Token(_)
            | AccountError::DatabaseError(_) => ErrorCode::InternalServerError,
        }
    }
}

impl From<AuthenticationError> for AccountError {
    fn from(err: AuthenticationError) -> Self {
        match err {
            AuthenticationError::InvalidCredentials => AccountError::InvalidPassword,
            AuthenticationError::InvalidToken => AccountError::Unauthorized,
            AuthenticationError::PasswordError(e) => AccountError::Hashing(e),
            AuthenticationError::JwtError(e) => AccountError::Token(e),
        }
    }
}
