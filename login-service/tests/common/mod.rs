use std::sync::Arc;

use auth::TokenIssuer;
use login_service::domain::login::models::Role;
use login_service::domain::login::models::User;
use login_service::domain::login::models::UserId;
use login_service::domain::login::service::AuthService;
use login_service::inbound::http::router::create_router;
use login_service::outbound::repositories::InMemoryUserStore;

/// Signing secret shared by the spawned server and the test's own issuer.
pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Password every seeded account with a password logs in with.
pub const TEST_PASSWORD: &str = "password";

// Bcrypt cost-10 hash of TEST_PASSWORD.
pub const TEST_PASSWORD_HASH: &str = "$2a$10$c4WCXRkTtYb3fJ7Wpnjok.nhrEcFyxqpJ/mjfAjBDzqW1IWT6EjVi";

/// Seeded applicant that signs in by email.
pub fn applicant() -> User {
    User {
        id: UserId(1),
        role: Role::Applicant,
        username: None,
        email: Some("applicant@example.com".to_string()),
        password_hash: Some(TEST_PASSWORD_HASH.to_string()),
    }
}

/// Seeded applicant whose account has no password on record yet.
pub fn passwordless_applicant() -> User {
    User {
        id: UserId(2),
        role: Role::Applicant,
        username: None,
        email: Some("fresh-applicant@example.com".to_string()),
        password_hash: None,
    }
}

/// Seeded recruiter that signs in by username.
pub fn recruiter() -> User {
    User {
        id: UserId(3),
        role: Role::Recruiter,
        username: Some("the_recruiter".to_string()),
        email: None,
        password_hash: Some(TEST_PASSWORD_HASH.to_string()),
    }
}

/// Test application that spawns a real server over an in-memory user store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub token_issuer: TokenIssuer,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new(vec![
            applicant(),
            passwordless_applicant(),
            recruiter(),
        ]));
        let auth_service = Arc::new(AuthService::new(store, TokenIssuer::new(TEST_SECRET)));
        let router = create_router(auth_service);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            token_issuer: TokenIssuer::new(TEST_SECRET),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }
}
