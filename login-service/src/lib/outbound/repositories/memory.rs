use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::login::errors::StoreError;
use crate::domain::login::models::Identity;
use crate::domain::login::models::Role;
use crate::domain::login::models::User;
use crate::domain::login::models::UserId;
use crate::domain::login::ports::UserStore;

/// The database URL that selects this store instead of Postgres.
pub const MOCK_DATABASE_URL: &str = "mock";

// Bcrypt cost-10 hash of "password".
const MOCK_PASSWORD_HASH: &str = "$2a$10$c4WCXRkTtYb3fJ7Wpnjok.nhrEcFyxqpJ/mjfAjBDzqW1IWT6EjVi";

/// In-memory user store.
///
/// Backs the server's mock mode and the black-box test suite. The whole
/// user set lives behind one read-write lock, which is plenty for both.
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserStore {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }

    /// A store seeded with the demo accounts served in mock mode.
    ///
    /// Both accounts log in with the password `password`.
    pub fn with_mock_users() -> Self {
        Self::new(vec![
            User {
                id: UserId(1),
                role: Role::Applicant,
                username: None,
                email: Some("mock-applicant@example.com".to_string()),
                password_hash: Some(MOCK_PASSWORD_HASH.to_string()),
            },
            User {
                id: UserId(2),
                role: Role::Recruiter,
                username: Some("mock_recruiter".to_string()),
                email: None,
                password_hash: Some(MOCK_PASSWORD_HASH.to_string()),
            },
        ])
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>, StoreError> {
        let users = self
            .users
            .read()
            .map_err(|_| StoreError::Unavailable("user store lock poisoned".to_string()))?;

        Ok(users
            .iter()
            .find(|user| {
                user.username.as_deref() == Some(identity.as_str())
                    || user.email.as_deref() == Some(identity.as_str())
            })
            .cloned())
    }

    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<u64, StoreError> {
        let mut users = self
            .users
            .write()
            .map_err(|_| StoreError::Unavailable("user store lock poisoned".to_string()))?;

        match users.iter_mut().find(|user| user.id == id) {
            Some(user) => {
                user.password_hash = Some(password_hash.to_string());
                Ok(1)
            }
            None => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_finds_seeded_user_by_email() {
        let store = InMemoryUserStore::with_mock_users();
        let identity = Identity::new("mock-applicant@example.com").unwrap();

        let user = store.find_by_identity(&identity).await.unwrap().unwrap();

        assert_eq!(user.id, UserId(1));
        assert_eq!(user.role, Role::Applicant);
    }

    #[tokio::test]
    async fn test_finds_seeded_user_by_username() {
        let store = InMemoryUserStore::with_mock_users();
        let identity = Identity::new("mock_recruiter").unwrap();

        let user = store.find_by_identity(&identity).await.unwrap().unwrap();

        assert_eq!(user.id, UserId(2));
        assert_eq!(user.role, Role::Recruiter);
    }

    #[tokio::test]
    async fn test_find_misses_unknown_identity() {
        let store = InMemoryUserStore::with_mock_users();
        let identity = Identity::new("nobody@example.com").unwrap();

        let user = store.find_by_identity(&identity).await.unwrap();

        assert_eq!(user, None);
    }

    #[tokio::test]
    async fn test_set_password_hash_updates_stored_user() {
        let store = InMemoryUserStore::with_mock_users();
        let identity = Identity::new("mock-applicant@example.com").unwrap();

        let rows = store
            .set_password_hash(UserId(1), "$2a$10$replacement")
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let user = store.find_by_identity(&identity).await.unwrap().unwrap();
        assert_eq!(user.password_hash.as_deref(), Some("$2a$10$replacement"));
    }

    #[tokio::test]
    async fn test_set_password_hash_reports_missing_user() {
        let store = InMemoryUserStore::with_mock_users();

        let rows = store
            .set_password_hash(UserId(99), "$2a$10$replacement")
            .await
            .unwrap();

        assert_eq!(rows, 0);
    }
}
