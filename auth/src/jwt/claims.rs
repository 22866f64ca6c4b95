use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

/// Separator used when several authorities are packed into the `auth` claim.
pub const AUTHORITY_SEPARATOR: char = ',';

/// Claims carried by access and refresh tokens.
///
/// Access tokens carry the `auth` claim, refresh tokens never do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (account email)
    pub sub: String,

    /// Comma-joined authority list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,

    /// Issued at (Unix timestamp, seconds)
    pub iat: i64,

    /// Expiration time (Unix timestamp, seconds)
    pub exp: i64,

    /// Unique token identifier
    pub jti: String,
}

impl Claims {
    /// Claims for an access token issued at `now`.
    pub fn access(
        subject: impl ToString,
        authorities: impl ToString,
        now: DateTime<Utc>,
        lifetime: Duration,
    ) -> Self {
        Self {
            auth: Some(authorities.to_string()),
            ..Self::refresh(subject, now, lifetime)
        }
    }

    /// Claims for a refresh token issued at `now`.
    pub fn refresh(subject: impl ToString, now: DateTime<Utc>, lifetime: Duration) -> Self {
        let issued_at = now.timestamp();

        Self {
            sub: subject.to_string(),
            auth: None,
            iat: issued_at,
            exp: issued_at + lifetime.num_seconds(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Split the `auth` claim into individual authorities.
    pub fn authorities(&self) -> Option<Vec<String>> {
        self.auth.as_ref().map(|auth| {
            auth.split(AUTHORITY_SEPARATOR)
                .map(str::trim)
                .filter(|authority| !authority.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// Expiration instant in milliseconds since the epoch.
    pub fn expires_at_millis(&self) -> i64 {
        self.exp * 1000
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
