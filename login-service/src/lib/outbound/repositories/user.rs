use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::login::errors::StoreError;
use crate::domain::login::models::Identity;
use crate::domain::login::models::Role;
use crate::domain::login::models::User;
use crate::domain::login::models::UserId;
use crate::domain::login::ports::UserStore;

/// User store backed by the shared `person` table in Postgres.
///
/// The table is owned by the account-provisioning system; this service only
/// ever reads accounts and rewrites password hashes, so the queries are
/// written at runtime against whatever schema revision is deployed.
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT person_id, username, email, password, role_id
            FROM person
            WHERE username = $1 OR email = $1
            "#,
        )
        .bind(identity.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        row.map(user_from_row).transpose()
    }

    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<u64, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE person
            SET password = $2
            WHERE person_id = $1
            "#,
        )
        .bind(id.0)
        .bind(password_hash)
        .execute(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(result.rows_affected())
    }
}

fn unavailable(e: sqlx::Error) -> StoreError {
    StoreError::Unavailable(e.to_string())
}

/// Map a `person` row onto the domain model.
///
/// Legacy rows use empty strings where newer rows use NULL; both read back
/// as an absent handle or password.
fn user_from_row(row: PgRow) -> Result<User, StoreError> {
    let person_id: i64 = row.try_get("person_id").map_err(unavailable)?;
    let role_id: i32 = row.try_get("role_id").map_err(unavailable)?;
    let role =
        Role::try_from(role_id).map_err(|e| StoreError::Unavailable(e.to_string()))?;
    let username: Option<String> = row.try_get("username").map_err(unavailable)?;
    let email: Option<String> = row.try_get("email").map_err(unavailable)?;
    let password_hash: Option<String> = row.try_get("password").map_err(unavailable)?;

    Ok(User {
        id: UserId(person_id),
        role,
        username: username.filter(|s| !s.is_empty()),
        email: email.filter(|s| !s.is_empty()),
        password_hash: password_hash.filter(|s| !s.is_empty()),
    })
}
