use std::sync::Arc;

use auth::PasswordHasher;
use auth::SignedToken;
use auth::TokenIssuer;
use auth::TokenUsage;

use crate::domain::login::errors::AuthError;
use crate::domain::login::models::AuthOutcome;
use crate::domain::login::models::Identity;
use crate::domain::login::models::Role;
use crate::domain::login::models::User;
use crate::domain::login::models::UserClaims;
use crate::domain::login::models::UserSnapshot;
use crate::domain::login::ports::UserStore;

/// Canonical implementation of the authentication domain.
///
/// Owns credential verification, password resets and all token minting.
/// External layers talk to this service and never to the hasher, issuer or
/// store directly.
pub struct AuthService {
    store: Arc<dyn UserStore>,
    password_hasher: PasswordHasher,
    token_issuer: TokenIssuer,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, token_issuer: TokenIssuer) -> Self {
        Self {
            store,
            password_hasher: PasswordHasher::new(),
            token_issuer,
        }
    }

    /// Verify a user's credentials.
    ///
    /// Read-only: nothing is written and no token is minted. The caller
    /// layers token issuance on top of the returned outcome.
    ///
    /// # Arguments
    /// - `identity`: Username-or-email handle to look up.
    /// - `password`: Plaintext candidate password.
    /// - `expected_role`: When set, the matched account must carry exactly
    ///   this role; a mismatch reports [AuthOutcome::WrongIdentity], the
    ///   same outcome an unknown handle produces.
    ///
    /// # Errors
    /// - [AuthError::Store] if the user store cannot be reached.
    pub async fn authenticate(
        &self,
        identity: &Identity,
        password: &str,
        expected_role: Option<Role>,
    ) -> Result<AuthOutcome, AuthError> {
        let Some(user) = self.store.find_by_identity(identity).await? else {
            return Ok(AuthOutcome::WrongIdentity(None));
        };

        if let Some(expected) = expected_role {
            if user.role != expected {
                // Externally indistinguishable from an unknown handle. The
                // matched user still travels with the outcome for callers
                // that want to log the distinction.
                return Ok(AuthOutcome::WrongIdentity(Some(user)));
            }
        }

        let verified = user
            .password_hash
            .as_deref()
            .map(|hash| self.password_hasher.verify(password, hash));

        match verified {
            None => Ok(AuthOutcome::MissingPassword(user)),
            Some(false) => Ok(AuthOutcome::WrongPassword(user)),
            Some(true) => Ok(AuthOutcome::Success(user)),
        }
    }

    /// Set a new password for the subject of a reset token, then mint a
    /// fresh login token for them.
    ///
    /// The usage check comes first: a login token must never authorize a
    /// password change, however valid it is otherwise.
    ///
    /// # Arguments
    /// - `claims`: Decoded claims of the token presented by the client.
    /// - `new_password`: Plaintext replacement password.
    ///
    /// # Errors
    /// - [AuthError::WrongUsage] if the token is not a reset token.
    /// - [AuthError::UserNotFound] if the account vanished since the token
    ///   was minted.
    /// - [AuthError::Hashing] if the new password cannot be hashed.
    /// - [AuthError::Signing] if the fresh login token cannot be signed.
    /// - [AuthError::Store] if the user store cannot be reached.
    pub async fn reset_password(
        &self,
        claims: &UserClaims,
        new_password: &str,
    ) -> Result<SignedToken, AuthError> {
        if claims.usage != TokenUsage::Reset {
            return Err(AuthError::WrongUsage);
        }

        let password_hash = self
            .password_hasher
            .hash(new_password)
            .map_err(AuthError::Hashing)?;

        let rows_affected = self
            .store
            .set_password_hash(claims.user.id, &password_hash)
            .await?;
        if rows_affected == 0 {
            return Err(AuthError::UserNotFound);
        }

        // Setting a password doubles as a login: the client walks away with
        // a session for the account the reset token was minted for.
        self.token_issuer
            .issue_login(claims.user.clone())
            .map_err(AuthError::Signing)
    }

    /// Mint a login token for `user`.
    ///
    /// # Errors
    /// - [AuthError::Signing] if the token cannot be signed.
    pub fn issue_login_token(&self, user: &User) -> Result<SignedToken, AuthError> {
        self.token_issuer
            .issue_login(UserSnapshot::from(user))
            .map_err(AuthError::Signing)
    }

    /// Mint a short-lived reset token for `user`.
    ///
    /// # Errors
    /// - [AuthError::Signing] if the token cannot be signed.
    pub fn issue_reset_token(&self, user: &User) -> Result<SignedToken, AuthError> {
        self.token_issuer
            .issue_reset(UserSnapshot::from(user))
            .map_err(AuthError::Signing)
    }

    /// Decode and validate a bearer token into user claims.
    ///
    /// Validates signature and expiry only. Usage is checked by the
    /// operation that consumes the claims, not here.
    ///
    /// # Errors
    /// - [AuthError::InvalidToken] if the token is expired or malformed.
    pub fn decode_token(&self, token: &str) -> Result<UserClaims, AuthError> {
        self.token_issuer
            .decode(token)
            .map_err(AuthError::InvalidToken)
    }
}
