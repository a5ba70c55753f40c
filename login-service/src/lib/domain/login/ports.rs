/*!
   Ports are the interfaces that the domain needs in order to interact
   with the outside world.
*/

use async_trait::async_trait;

use crate::domain::login::errors::StoreError;
use crate::domain::login::models::Identity;
use crate::domain::login::models::User;
use crate::domain::login::models::UserId;

/// `UserStore` is the persistence port for stored user accounts.
///
/// Object-safe on purpose: the backing store is chosen at startup, either
/// Postgres or the in-memory store used by mock mode and the test suite.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Look up the single user whose username or email equals `identity`.
    ///
    /// # Arguments
    /// - `identity`: The login handle the client presented.
    ///
    /// # Returns
    /// The matching [User], or `None` when nothing matched.
    ///
    /// # Errors
    /// - [StoreError::Unavailable] if the store cannot be reached.
    async fn find_by_identity(&self, identity: &Identity) -> Result<Option<User>, StoreError>;

    /// Overwrite the stored password hash of the user with id `id`.
    ///
    /// # Arguments
    /// - `id`: The account to update.
    /// - `password_hash`: The already-hashed replacement password.
    ///
    /// # Returns
    /// The number of rows affected. Zero means no such account exists; the
    /// caller decides whether that is an error.
    ///
    /// # Errors
    /// - [StoreError::Unavailable] if the store cannot be reached.
    async fn set_password_hash(&self, id: UserId, password_hash: &str) -> Result<u64, StoreError>;
}
