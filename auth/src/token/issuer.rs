use std::sync::Arc;

use chrono::DateTime;
use chrono::SubsecRound;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::Deserialize;
use serde::Serialize;

use crate::clock::Clock;
use crate::clock::SystemClock;

use super::claims::Claims;
use super::claims::TokenUsage;
use super::errors::TokenError;

/// A freshly minted token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct SignedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Mints and validates usage-tagged tokens.
///
/// Uses HS256 (HMAC with SHA-256) with a single shared secret, so the same
/// issuer both signs and verifies. Issued-at and expiry are read from the
/// injected [`Clock`]; lifetimes are fixed per usage.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    clock: Arc<dyn Clock>,
}

impl TokenIssuer {
    /// Create a token issuer reading the wall clock.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (should be stored securely)
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// Create a token issuer with an explicit clock.
    pub fn with_clock(secret: &[u8], clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            clock,
        }
    }

    /// Mint a login token for `user`, valid for one hour.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_login<U: Serialize>(&self, user: U) -> Result<SignedToken, TokenError> {
        self.issue(TokenUsage::Login, user)
    }

    /// Mint a reset token for `user`, valid for ten minutes.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_reset<U: Serialize>(&self, user: U) -> Result<SignedToken, TokenError> {
        self.issue(TokenUsage::Reset, user)
    }

    fn issue<U: Serialize>(&self, usage: TokenUsage, user: U) -> Result<SignedToken, TokenError> {
        // Whole seconds, so the expiry reported alongside the token equals
        // the encoded `exp` claim exactly.
        let issued_at = self.clock.now().trunc_subsecs(0);
        let expires_at = issued_at + usage.lifetime();

        let claims = Claims {
            usage,
            user,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let header = Header::new(self.algorithm);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))?;

        Ok(SignedToken { token, expires_at })
    }

    /// Decode a token, validating its signature and expiry.
    ///
    /// Decoding is pure: the same token yields the same claims every time.
    /// The usage tag is returned as-is; whether a usage is acceptable is the
    /// caller's decision, not the decoder's.
    ///
    /// # Errors
    /// * `Expired` - The expiry instant is in the past
    /// * `Invalid` - Bad signature, malformed token, or missing claims
    pub fn decode<U: for<'de> Deserialize<'de>>(
        &self,
        token: &str,
    ) -> Result<Claims<U>, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims<U>>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
