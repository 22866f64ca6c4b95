use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;
use crate::principal::Principal;

/// Issues and reads the access/refresh tokens of the application.
///
/// Tokens are self-contained: validity depends only on the token bytes and
/// the signing secret, no session state is kept anywhere.
#[derive(Clone)]
pub struct TokenProvider {
    handler: JwtHandler,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl TokenProvider {
    /// Create a token provider.
    ///
    /// # Arguments
    /// * `secret` - Signing secret (at least 32 bytes)
    /// * `access_lifetime` - Lifetime of access tokens
    /// * `refresh_lifetime` - Lifetime of refresh tokens
    ///
    /// # Errors
    /// * `WeakSecret` - Secret is too short for HS256
    pub fn new(
        secret: &[u8],
        access_lifetime: Duration,
        refresh_lifetime: Duration,
    ) -> Result<Self, JwtError> {
        Ok(Self {
            handler: JwtHandler::new(secret)?,
            access_lifetime,
            refresh_lifetime,
        })
    }

    pub fn access_lifetime(&self) -> Duration {
        self.access_lifetime
    }

    /// Create a signed access token carrying the subject and its authorities.
    pub fn create_access_token(&self, subject: &str, authorities: &str) -> Result<String, JwtError> {
        let claims = Claims::access(subject, authorities, Utc::now(), self.access_lifetime);
        self.handler.encode(&claims)
    }

    /// Create a signed refresh token carrying only the subject.
    pub fn create_refresh_token(&self, subject: &str) -> Result<String, JwtError> {
        let claims = Claims::refresh(subject, Utc::now(), self.refresh_lifetime);
        self.handler.encode(&claims)
    }

    /// Check signature, structure and expiry.
    ///
    /// Never fails: every problem collapses to `false`. The reason is only
    /// logged.
    pub fn validate_token(&self, token: &str) -> bool {
        match self.handler.decode::<Claims>(token) {
            Ok(_) => true,
            Err(JwtError::InvalidSignature) | Err(JwtError::Malformed(_)) => {
                tracing::info!("Invalid JWT signature or malformed token");
                false
            }
            Err(JwtError::TokenExpired) => {
                tracing::info!("Expired JWT token");
                false
            }
            Err(JwtError::Unsupported(_)) => {
                tracing::info!("Unsupported JWT token");
                false
            }
            Err(e) => {
                tracing::info!(error = %e, "JWT token is invalid");
                false
            }
        }
    }

    /// Read the claims of a correctly signed token, expired or not.
    pub fn parse_claims(&self, token: &str) -> Result<Claims, JwtError> {
        self.handler.decode_allow_expired(token)
    }

    /// Subject (email) of a correctly signed token. Tolerates expiry.
    pub fn email_from_token(&self, token: &str) -> Result<String, JwtError> {
        self.parse_claims(token).map(|claims| claims.sub)
    }

    /// Milliseconds until the token expires; negative once expired.
    pub fn expiration(&self, token: &str) -> Result<i64, JwtError> {
        let claims = self.parse_claims(token)?;
        Ok(claims.expires_at_millis() - Utc::now().timestamp_millis())
    }

    /// Authenticated principal of a valid, unexpired access token.
    ///
    /// # Errors
    /// * `MissingClaim("auth")` - Token carries no authorities (e.g. a refresh token)
    /// * Any decoding error of [`JwtHandler::decode`]
    pub fn principal(&self, token: &str) -> Result<Principal, JwtError> {
        let claims: Claims = self.handler.decode(token)?;
        let authorities = claims
            .authorities()
            .ok_or_else(|| JwtError::MissingClaim("auth".to_string()))?;

        Ok(Principal::new(claims.sub, authorities))
    }
}
