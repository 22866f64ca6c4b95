use std::fmt;
use std::str::FromStr;

use auth::AuthenticationResult;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::NicknameError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::RoleError;

/// Account aggregate entity.
///
/// Represents one registered user as persisted by the credential store.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub nickname: Nickname,
    pub password_hash: HashedPassword,
    pub role: Role,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// Authorities granted to this account, comma-joined for the token `auth` claim.
    pub fn authorities(&self) -> String {
        self.role.key().to_string()
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Only active accounts may log in or refresh.
    pub fn is_active(&self) -> bool {
        !self.deleted
    }

    pub fn update_nickname(&mut self, nickname: Nickname) {
        self.nickname = nickname;
    }

    pub fn update_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Soft delete. Rows are never removed by this service.
    pub fn delete(&mut self) {
        self.deleted = true;
    }

    pub fn restore(&mut self) {
        self.deleted = false;
    }
}

/// Account data before the store has assigned an id and timestamps.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: EmailAddress,
    pub nickname: Nickname,
    pub password_hash: HashedPassword,
    pub role: Role,
}

impl NewAccount {
    /// New active account with the default `USER` role.
    pub fn new(email: EmailAddress, nickname: Nickname, password_hash: HashedPassword) -> Self {
        Self {
            email,
            nickname,
            password_hash,
            role: Role::default(),
        }
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Account unique identifier, assigned by the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(pub i64);

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Surrounding
/// whitespace is dropped; case is preserved and compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    const MAX_LENGTH: usize = 100;

    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    /// * `TooLong` - Longer than 100 characters
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_string();

        let length = email.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(EmailError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Unique among active accounts; 1 to 50 characters, not blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nickname(String);

impl Nickname {
    const MAX_LENGTH: usize = 50;

    /// Create a new valid nickname.
    ///
    /// # Errors
    /// * `Blank` - Empty or whitespace only
    /// * `TooLong` - Longer than 50 characters
    pub fn new(nickname: String) -> Result<Self, NicknameError> {
        let nickname = nickname.trim().to_string();
        if nickname.is_empty() {
            return Err(NicknameError::Blank);
        }

        let length = nickname.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(NicknameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(nickname))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Nickname {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Raw password as submitted by the user. Never persisted, never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 8;
    const MAX_LENGTH: usize = 128;

    /// # Errors
    /// * `TooShort` - Fewer than 8 characters
    /// * `TooLong` - More than 128 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(PasswordPolicyError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(password))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password([REDACTED])")
    }
}

/// One-way hash of a password.
///
/// Wraps the output of a secret hasher or a value read back from a store.
/// Carries no validation of its own.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn new(hash: String) -> Self {
        Self(hash)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([REDACTED])")
    }
}

/// Account role. Carried in access tokens; not enforced by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Authority key placed in the token `auth` claim.
    pub fn key(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Admin => "ROLE_ADMIN",
        }
    }

    /// Name used for storage and API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = RoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "ADMIN" => Ok(Role::Admin),
            other => Err(RoleError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub nickname: Nickname,
}

impl RegisterCommand {
    pub fn new(email: EmailAddress, password: Password, nickname: Nickname) -> Self {
        Self {
            email,
            password,
            nickname,
        }
    }
}

/// Command to log in with email and password.
///
/// The password is not policy-checked here: a login only compares against
/// the stored hash.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Public view of an account. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSummary {
    pub id: AccountId,
    pub email: String,
    pub nickname: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&Account> for AccountSummary {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.as_str().to_string(),
            nickname: account.nickname.as_str().to_string(),
            role: account.role,
            created_at: account.created_at,
        }
    }
}

/// Access and refresh token issued by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: &'static str,
    /// Remaining lifetime of the access token in milliseconds
    pub expires_in: i64,
}

impl TokenPair {
    pub const TOKEN_TYPE: &'static str = "Bearer";
}

impl From<AuthenticationResult> for TokenPair {
    fn from(result: AuthenticationResult) -> Self {
        Self {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: Self::TOKEN_TYPE,
            expires_in: result.expires_in,
        }
    }
}
