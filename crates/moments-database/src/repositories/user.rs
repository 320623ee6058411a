//! User repository implementation.

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::warn;

use moments_core::result::AppResult;
use moments_entity::user::{AuthType, User};

use super::store_error;
use crate::store::UserStore;

#[derive(Debug, FromRow)]
struct UserRow {
    email: String,
    first_name: String,
    last_name: String,
    google_id: Option<String>,
    auth_type: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let auth_type = row.auth_type.parse().unwrap_or_else(|_| {
            warn!(email = %row.email, auth_type = %row.auth_type, "Unknown auth type, assuming email");
            AuthType::Email
        });
        Self {
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            google_id: row.google_id,
            auth_type,
        }
    }
}

/// Repository for user profile lookups.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT email, first_name, last_name, google_id, auth_type FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error("Failed to find user"))?;
        Ok(row.map(User::from))
    }

    async fn upsert_user(&self, user: &User) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO users (email, first_name, last_name, google_id, auth_type) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (email) DO UPDATE SET first_name = EXCLUDED.first_name, \
             last_name = EXCLUDED.last_name, google_id = EXCLUDED.google_id, \
             auth_type = EXCLUDED.auth_type",
        )
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.google_id)
        .bind(user.auth_type.as_str())
        .execute(&self.pool)
        .await
        .map_err(store_error("Failed to upsert user"))?;
        Ok(())
    }
}
