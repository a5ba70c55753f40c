pub mod claims;
pub mod errors;
pub mod issuer;

pub use claims::Claims;
pub use claims::TokenUsage;
pub use claims::LOGIN_TOKEN_TTL_SECS;
pub use claims::RESET_TOKEN_TTL_SECS;
pub use errors::TokenError;
pub use issuer::SignedToken;
pub use issuer::TokenIssuer;
