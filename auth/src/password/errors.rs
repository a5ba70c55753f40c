use thiserror::Error;

/// Error type for password operations.
///
/// Verification is deliberately infallible (a bad hash just fails to match),
/// so only hashing carries an error case.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
