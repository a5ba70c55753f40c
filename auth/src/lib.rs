//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for microservices:
//! - Password hashing (bcrypt, at a fixed cost shared with the account system)
//! - Usage-tagged token generation and validation
//! - An injectable clock so expiry behavior is testable without waiting
//!
//! Each service defines its own subject payload and adapts these implementations.
//! This avoids coupling services through shared domain logic while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Tokens
//! ```
//! use auth::TokenIssuer;
//! use auth::TokenUsage;
//! use serde::Deserialize;
//! use serde::Serialize;
//!
//! #[derive(Serialize, Deserialize)]
//! struct Subject {
//!     id: i64,
//! }
//!
//! let issuer = TokenIssuer::new(b"secret_key_at_least_32_bytes_long!");
//! let signed = issuer.issue_login(Subject { id: 7 }).unwrap();
//!
//! let claims = issuer.decode::<Subject>(&signed.token).unwrap();
//! assert_eq!(claims.usage, TokenUsage::Login);
//! assert_eq!(claims.user.id, 7);
//! ```

pub mod clock;
pub mod password;
pub mod token;

// Re-export commonly used items
pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::SignedToken;
pub use token::TokenError;
pub use token::TokenIssuer;
pub use token::TokenUsage;
pub use token::LOGIN_TOKEN_TTL_SECS;
pub use token::RESET_TOKEN_TTL_SECS;
