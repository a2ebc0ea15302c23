//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::account::Account;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    AccountId, account_password::AccountPassword, account_role::AccountRole, email::Email,
    full_name::FullName, user_name::UserName,
};
use crate::error::{AccountError, AccountResult};

const EMAIL_UNIQUE: &str = "accounts_email_key";
const USER_NAME_UNIQUE: &str = "accounts_user_name_canonical_key";

const SELECT_ACCOUNT: &str = r#"
    SELECT
        account_id,
        email,
        user_name,
        user_name_canonical,
        full_name,
        password_hash,
        role,
        is_active,
        avatar_url,
        points,
        created_at,
        updated_at
    FROM accounts
"#;

/// PostgreSQL-backed account repository
#[derive(Clone)]
pub struct PgAccountRepository {
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for PgAccountRepository {
    async fn find_by_email(&self, email: &Email) -> AccountResult<Option<Account>> {
        let sql = format!("{SELECT_ACCOUNT} WHERE email = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AccountResult<Option<Account>> {
        let sql = format!("{SELECT_ACCOUNT} WHERE user_name_canonical = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(user_name.canonical())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AccountResult<Option<Account>> {
        let sql = format!("{SELECT_ACCOUNT} WHERE account_id = $1");
        let row = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(account_id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(AccountRow::into_account).transpose()
    }

    async fn insert(&self, account: &Account) -> AccountResult<()> {
        sqlx::query(
            r#"
            INSERT INTO accounts (
                account_id,
                email,
                user_name,
                user_name_canonical,
                full_name,
                password_hash,
                role,
                is_active,
                avatar_url,
                points,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.email.as_str())
        .bind(account.user_name.original())
        .bind(account.user_name.canonical())
        .bind(account.full_name.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.role.id())
        .bind(account.is_active)
        .bind(account.avatar_url.as_deref())
        .bind(account.points)
        .bind(account.created_at)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_unique_violation)?;

        Ok(())
    }

    async fn update(&self, account: &Account) -> AccountResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                full_name = $2,
                password_hash = $3,
                role = $4,
                is_active = $5,
                avatar_url = $6,
                points = $7,
                updated_at = $8
            WHERE account_id = $1
            "#,
        )
        .bind(account.account_id.as_uuid())
        .bind(account.full_name.as_str())
        .bind(account.password_hash.as_phc_string())
        .bind(account.role.id())
        .bind(account.is_active)
        .bind(account.avatar_url.as_deref())
        .bind(account.points)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AccountError::AccountNotFound);
        }

        Ok(())
    }

    async fn list(&self, skip: u64, limit: u64) -> AccountResult<Vec<Account>> {
        let sql = format!("{SELECT_ACCOUNT} ORDER BY seq OFFSET $1 LIMIT $2");
        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(i64::try_from(skip).unwrap_or(i64::MAX))
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(AccountRow::into_account).collect()
    }
}

/// Attribute a unique violation to the constraint that raised it
fn map_unique_violation(err: sqlx::Error) -> AccountError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return match db_err.constraint() {
                Some(EMAIL_UNIQUE) => AccountError::EmailTaken,
                Some(USER_NAME_UNIQUE) => AccountError::UserNameTaken,
                _ => AccountError::AccountExists,
            };
        }
    }

    AccountError::Database(err)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    account_id: Uuid,
    email: String,
    user_name: String,
    user_name_canonical: String,
    full_name: String,
    password_hash: String,
    role: i16,
    is_active: bool,
    avatar_url: Option<String>,
    points: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self) -> AccountResult<Account> {
        let role = AccountRole::from_id(self.role)
            .ok_or_else(|| AccountError::Internal(format!("Invalid role id: {}", self.role)))?;

        Ok(Account {
            account_id: AccountId::from_uuid(self.account_id),
            email: Email::from_db(self.email),
            user_name: UserName::from_db(self.user_name, self.user_name_canonical),
            full_name: FullName::from_db(self.full_name),
            password_hash: AccountPassword::from_db(self.password_hash),
            role,
            is_active: self.is_active,
            avatar_url: self.avatar_url,
            points: self.points,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
