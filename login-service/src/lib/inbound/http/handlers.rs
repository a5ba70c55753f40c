use serde::Serialize;

pub mod login;
pub mod reset;

/// HTTP response body carrying a freshly minted token.
///
/// Expiry travels inside the token itself; clients treat the string as
/// opaque and present it back as a bearer credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenResponse {
    pub token: String,
}
