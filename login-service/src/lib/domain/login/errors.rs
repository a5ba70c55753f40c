use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

/// Top-level error for authentication and reset operations.
///
/// One tagged error model shared by the whole domain service; the HTTP
/// boundary classifies these into transport codes in a single place.
#[derive(Clone, Debug, Error)]
pub enum AuthError {
    /// The presented token is valid but minted for a different purpose.
    #[error("Token usage does not permit this operation")]
    WrongUsage,

    /// The account referenced by a reset token no longer exists.
    #[error("User not found")]
    UserNotFound,

    /// The presented token failed signature or expiry validation.
    #[error("Invalid token: {0}")]
    InvalidToken(TokenError),

    /// Hashing the new password failed.
    #[error("Password hashing failed: {0}")]
    Hashing(PasswordError),

    /// Signing a fresh token failed.
    #[error("Token signing failed: {0}")]
    Signing(TokenError),

    /// The user store could not be reached.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Error for user persistence operations.
#[derive(Clone, Debug, Error)]
pub enum StoreError {
    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

/// Error for parsing a role from its numeric database tag.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RoleError {
    #[error("Unknown role tag: {0}")]
    UnknownTag(i32),
}

/// Error for constructing an [`Identity`](super::models::Identity).
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity must not be empty")]
    Empty,
}
