use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::HashedPassword;
use crate::domain::account::models::NewAccount;
use crate::domain::account::models::Nickname;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::Visibility;

const ACTIVE_EMAIL_KEY: &str = "accounts_active_email_key";
const ACTIVE_NICKNAME_KEY: &str = "accounts_active_nickname_key";

/// PostgreSQL implementation of AccountRepository.
///
/// Uniqueness among active accounts is enforced by partial unique indexes,
/// so `save` stays correct under concurrent registrations.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    nickname: String,
    password_hash: String,
    role: String,
    deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    // A stored row that fails validation is a store fault, not bad input
    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let corrupt = |e: &dyn std::fmt::Display| {
            AccountError::DatabaseError(format!("Corrupt account row {}: {}", row.id, e))
        };

        Ok(Account {
            id: AccountId(row.id),
            email: EmailAddress::new(row.email).map_err(|e| corrupt(&e))?,
            nickname: Nickname::new(row.nickname).map_err(|e| corrupt(&e))?,
            password_hash: HashedPassword::new(row.password_hash),
            role: row.role.parse::<Role>().map_err(|e| corrupt(&e))?,
            deleted: row.deleted,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn include_deleted(visibility: Visibility) -> bool {
    visibility == Visibility::All
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn exists_by_email(
        &self,
        email: &EmailAddress,
        visibility: Visibility,
    ) -> Result<bool, AccountError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM accounts
                WHERE email = $1 AND ($2 OR deleted = FALSE)
            )
            "#,
        )
        .bind(email.as_str())
        .bind(include_deleted(visibility))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    async fn exists_by_nickname(
        &self,
        nickname: &Nickname,
        visibility: Visibility,
    ) -> Result<bool, AccountError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM accounts
                WHERE nickname = $1 AND ($2 OR deleted = FALSE)
            )
            "#,
        )
        .bind(nickname.as_str())
        .bind(include_deleted(visibility))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))
    }

    async fn find_by_email(
        &self,
        email: &str,
        visibility: Visibility,
    ) -> Result<Option<Account>, AccountError> {
        // With Visibility::All several rows may share an email; prefer the active one
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, nickname, password_hash, role, deleted, created_at, updated_at
            FROM accounts
            WHERE email = $1 AND ($2 OR deleted = FALSE)
            ORDER BY deleted ASC, id DESC
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(include_deleted(visibility))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn save(&self, account: NewAccount) -> Result<Account, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (email, nickname, password_hash, role, deleted)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING id, email, nickname, password_hash, role, deleted, created_at, updated_at
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.nickname.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.role.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    match db_err.constraint() {
                        Some(ACTIVE_EMAIL_KEY) => {
                            return AccountError::DuplicateEmail(account.email.to_string());
                        }
                        Some(ACTIVE_NICKNAME_KEY) => {
                            return AccountError::DuplicateNickname(account.nickname.to_string());
                        }
                        _ => {}
                    }
                }
            }
            AccountError::DatabaseError(e.to_string())
        })?;

        Account::try_from(row)
    }
}
