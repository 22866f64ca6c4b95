use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Nickname;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::Visibility;

/// In-process implementation of AccountRepository.
///
/// Used when no database is configured and by the test-suite. The
/// uniqueness check and the insert happen under one write lock.
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<Vec<Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Soft-delete the active account holding `email`.
    ///
    /// # Returns
    /// Whether an active account was found
    pub async fn soft_delete(&self, email: &str) -> bool {
        let mut accounts = self.accounts.write().await;

        match accounts
            .iter_mut()
            .find(|account| account.is_active() && account.email.as_str() == email)
        {
            Some(account) => {
                account.delete();
                account.updated_at = Utc::now();
                tracing::debug!(account_id = %account.id, "Account soft-deleted");
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn exists_by_email(
        &self,
        email: &EmailAddress,
        visibility: Visibility,
    ) -> Result<bool, AccountError> {
        let accounts = self.accounts.read().await;

        Ok(accounts
            .iter()
            .any(|account| visibility.admits(account) && account.email == *email))
    }

    async fn exists_by_nickname(
        &self,
        nickname: &Nickname,
        visibility: Visibility,
    ) -> Result<bool, AccountError> {
        let accounts = self.accounts.read().await;

        Ok(accounts
            .iter()
            .any(|account| visibility.admits(account) && account.nickname == *nickname))
    }

    async fn find_by_email(
        &self,
        email: &str,
        visibility: Visibility,
    ) -> Result<Option<Account>, AccountError> {
        let accounts = self.accounts.read().await;

        // Active first, then the most recent soft-deleted row
        let found = accounts
            .iter()
            .filter(|account| visibility.admits(account) && account.email.as_str() == email)
            .min_by_key(|account| (account.deleted, std::cmp::Reverse(account.id)));

        Ok(found.cloned())
    }

    async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
        let mut accounts = self.accounts.write().await;

        // Email is checked across all rows before nickname
        if accounts
            .iter()
            .any(|existing| existing.is_active() && existing.email == account.email)
        {
            return Err(AccountError::DuplicateEmail(account.email.to_string()));
        }

        if accounts
            .iter()
            .any(|existing| existing.is_active() && existing.nickname == account.nickname)
        {
            return Err(AccountError::DuplicateNickname(account.nickname.to_string()));
        }

        let now = Utc::now();
        let saved = Account {
            id: AccountId(accounts.len() as i64 + 1),
            email: account.email,
            nickname: account.nickname,
            password_hash: account.password_hash,
            role: account.role,
            deleted: false,
            created_at: now,
            updated_at: now,
        };

        accounts.push(saved.clone());

        Ok(saved)
    }
}
