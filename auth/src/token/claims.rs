use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Lifetime of login tokens, in seconds (one hour).
pub const LOGIN_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Lifetime of reset tokens, in seconds (ten minutes).
pub const RESET_TOKEN_TTL_SECS: i64 = 10 * 60;

/// What a token may be used for.
///
/// The usage tag keeps a short-lived reset token from doubling as a session
/// token and vice versa. Decoding does not check this field; callers decide
/// which usages they accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenUsage {
    /// A session token handed out after successful authentication.
    Login,
    /// A single-purpose token authorizing a password reset.
    Reset,
}

impl TokenUsage {
    /// Lifetime of tokens minted for this usage.
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenUsage::Login => Duration::seconds(LOGIN_TOKEN_TTL_SECS),
            TokenUsage::Reset => Duration::seconds(RESET_TOKEN_TTL_SECS),
        }
    }
}

/// Signed token claims, generic over the embedded subject payload.
///
/// The payload is flattened into the claim set: a `{ id, role }` subject
/// serializes as `{"usage":"login","id":…,"role":…,"iat":…,"exp":…}`.
/// Services define their own payload type; it must serialize to a JSON
/// object and must never contain secrets, since claims are only encoded,
/// not encrypted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims<U> {
    /// What the token may be used for.
    pub usage: TokenUsage,

    /// Snapshot of the subject the token was minted for.
    #[serde(flatten)]
    pub user: U,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,
}
