use crate::jwt::JwtError;
use crate::jwt::TokenProvider;
use crate::password::Argon2Hasher;
use crate::password::PasswordError;
use crate::password::SecretHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator<H = Argon2Hasher>
where
    H: SecretHasher,
{
    hasher: H,
    tokens: TokenProvider,
}

/// Tokens issued after a successful authentication or refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub refresh_token: String,
    /// Remaining lifetime of the access token, in milliseconds
    pub expires_in: i64,
}

/// Authentication operation errors.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl<H> Authenticator<H>
where
    H: SecretHasher,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `hasher` - Password hashing capability
    /// * `tokens` - Token codec
    pub fn new(hasher: H, tokens: TokenProvider) -> Self {
        Self { hasher, tokens }
    }

    pub fn tokens(&self) -> &TokenProvider {
        &self.tokens
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.hasher.hash(password)
    }

    /// Verify credentials and issue a token pair for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash could not be read
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
        authorities: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.hasher.matches(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        Ok(self.issue_tokens(subject, authorities)?)
    }

    /// Issue a token pair without password verification.
    ///
    /// Used by the refresh flow, where the caller has already proven
    /// possession of a valid refresh token.
    pub fn issue_tokens(
        &self,
        subject: &str,
        authorities: &str,
    ) -> Result<AuthenticationResult, JwtError> {
        let access_token = self.tokens.create_access_token(subject, authorities)?;
        let refresh_token = self.tokens.create_refresh_token(subject)?;
        let expires_in = self.tokens.expiration(&access_token)?;

        Ok(AuthenticationResult {
            access_token,
            refresh_token,
            expires_in,
        })
    }

    /// Subject of a presented refresh token.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is unsigned, tampered, malformed or expired
    pub fn refresh_subject(&self, refresh_token: &str) -> Result<String, AuthenticationError> {
        if !self.tokens.validate_token(refresh_token) {
            return Err(AuthenticationError::InvalidToken);
        }

        Ok(self.tokens.email_from_token(refresh_token)?)
    }
}
