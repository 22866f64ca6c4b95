use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::SecretHasher;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountSummary;
use crate::domain::account::models::HashedPassword;
use crate::domain::account::models::LoginCommand;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::models::TokenPair;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::Visibility;

/// Domain service implementation for registration, login and token refresh.
///
/// Holds no state of its own besides its collaborators; every call is
/// request-scoped and safe to run concurrently.
pub struct AuthService<AR, H>
where
    AR: AccountRepository,
    H: SecretHasher,
{
    repository: Arc<AR>,
    authenticator: Arc<Authenticator<H>>,
}

impl<AR, H> AuthService<AR, H>
where
    AR: AccountRepository,
    H: SecretHasher,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Credential store implementation
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<Authenticator<H>>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<AR, H> AuthServicePort for AuthService<AR, H>
where
    AR: AccountRepository,
    H: SecretHasher,
{
    async fn register(&self, command: RegisterCommand) -> Result<AccountSummary, AccountError> {
        // Advisory fast path; `save` enforces uniqueness for real
        if self
            .repository
            .exists_by_email(&command.email, Visibility::Active)
            .await?
        {
            tracing::debug!(email = %command.email, "Registration rejected: email in use");
            return Err(AccountError::DuplicateEmail(command.email.to_string()));
        }

        if self
            .repository
            .exists_by_nickname(&command.nickname, Visibility::Active)
            .await?
        {
            tracing::debug!(nickname = %command.nickname, "Registration rejected: nickname in use");
            return Err(AccountError::DuplicateNickname(command.nickname.to_string()));
        }

        let password_hash =
            HashedPassword::new(self.authenticator.hash_password(command.password.expose())?);

        let account = self
            .repository
            .save(NewAccount::new(command.email, command.nickname, password_hash))
            .await?;

        tracing::info!(
            account_id = %account.id,
            email = %account.email,
            "New account registered"
        );

        Ok(AccountSummary::from(&account))
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AccountError> {
        let account = self
            .repository
            .find_by_email(&command.email, Visibility::Active)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        let result = self
            .authenticator
            .authenticate(
                &command.password,
                account.password_hash.as_str(),
                account.email.as_str(),
                &account.authorities(),
            )
            .map_err(|e| {
                if matches!(e, AuthenticationError::InvalidCredentials) {
                    tracing::warn!(account_id = %account.id, "Login rejected: invalid password");
                }
                AccountError::from(e)
            })?;

        tracing::info!(account_id = %account.id, email = %account.email, "Account logged in");

        Ok(TokenPair::from(result))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AccountError> {
        let email = self.authenticator.refresh_subject(refresh_token)?;

        let account = self
            .repository
            .find_by_email(&email, Visibility::Active)
            .await?
            .ok_or(AccountError::UserNotFound)?;

        // The presented refresh token stays valid until its own expiry:
        // there is no revocation list.
        let result = self
            .authenticator
            .issue_tokens(account.email.as_str(), &account.authorities())?;

        tracing::info!(account_id = %account.id, email = %account.email, "Tokens refreshed");

        Ok(TokenPair::from(result))
    }
}
