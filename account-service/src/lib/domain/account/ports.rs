use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountSummary;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::TokenPair;

/// Which rows a store lookup may see.
///
/// Every lookup names it explicitly so no call site can forget the
/// soft-delete filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only accounts with `deleted = false`
    Active,
    /// Active and soft-deleted accounts
    All,
}

impl Visibility {
    pub fn admits(&self, account: &Account) -> bool {
        match self {
            Visibility::Active => account.is_active(),
            Visibility::All => true,
        }
    }
}

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Returns
    /// Summary of the created account (never the hash)
    ///
    /// # Errors
    /// * `DuplicateEmail` - An active account already uses the email
    /// * `DuplicateNickname` - An active account already uses the nickname
    /// * `Hashing` - Password hashing failed
    /// * `DatabaseError` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AccountSummary, AccountError>;

    /// Verify credentials and issue a token pair.
    ///
    /// # Errors
    /// * `UserNotFound` - No active account with this email
    /// * `InvalidPassword` - Password does not match
    /// * `DatabaseError` - Store operation failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AccountError>;

    /// Trade a valid refresh token for a new token pair.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is invalid, tampered or expired
    /// * `UserNotFound` - Subject no longer maps to an active account
    /// * `DatabaseError` - Store operation failed
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Whether an account with this email exists among `visibility`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_email(
        &self,
        email: &EmailAddress,
        visibility: Visibility,
    ) -> Result<bool, AccountError>;

    /// Whether an account with this nickname exists among `visibility`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn exists_by_nickname(
        &self,
        nickname: &Nickname,
        visibility: Visibility,
    ) -> Result<bool, AccountError>;

    /// Retrieve an account by email among `visibility`.
    ///
    /// # Returns
    /// Optional account (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_email(
        &self,
        email: &str,
        visibility: Visibility,
    ) -> Result<Option<Account>, AccountError>;

    /// Persist a new account, assigning its id and timestamps.
    ///
    /// The store is the authority on uniqueness: this fails even when a
    /// preceding `exists_*` check passed but a concurrent insert won.
    ///
    /// # Errors
    /// * `DuplicateEmail` - An active account already uses the email
    /// * `DuplicateNickname` - An active account already uses the nickname
    /// * `DatabaseError` - Database operation failed
    async fn save(&self, account: NewAccount) -> Result<Account, AccountError>;
}
