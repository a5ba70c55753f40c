use std::sync::Arc;

use auth::TokenIssuer;
use login_service::config::Config;
use login_service::domain::login::ports::UserStore;
use login_service::domain::login::service::AuthService;
use login_service::inbound::http::router::create_router;
use login_service::outbound::repositories::memory::MOCK_DATABASE_URL;
use login_service::outbound::repositories::InMemoryUserStore;
use login_service::outbound::repositories::PostgresUserStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "login_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "login-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    if config.jwt.secret.is_empty() {
        anyhow::bail!("jwt.secret must be set, either in config or via JWT__SECRET");
    }

    tracing::info!(
        database_url = %config.database.url,
        http_port = config.server.http_port,
        "Configuration loaded"
    );

    let user_store: Arc<dyn UserStore> = if config.database.url == MOCK_DATABASE_URL {
        tracing::warn!("Server is in mock mode and not connected to any database");
        Arc::new(InMemoryUserStore::with_mock_users())
    } else {
        let pg_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&config.database.url)
            .await?;
        tracing::info!(
            max_connections = 5,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        Arc::new(PostgresUserStore::new(pg_pool))
    };

    let token_issuer = TokenIssuer::new(config.jwt.secret.as_bytes());
    let auth_service = Arc::new(AuthService::new(user_store, token_issuer));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(auth_service)).await?;

    Ok(())
}
