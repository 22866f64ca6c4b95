use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::ports::AccountRepository;
use account_service::domain::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::Argon2Hasher;
use auth::Authenticator;
use auth::TokenProvider;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database_configured = config.database.url.is_some(),
        access_expiration_ms = config.jwt.access_expiration_ms,
        refresh_expiration_ms = config.jwt.refresh_expiration_ms,
        "Configuration loaded"
    );

    let hasher = Argon2Hasher::with_params(
        config.password.memory_kib,
        config.password.iterations,
        config.password.parallelism,
    )?;
    let tokens = TokenProvider::new(
        config.jwt.secret.as_bytes(),
        config.jwt.access_lifetime(),
        config.jwt.refresh_lifetime(),
    )?;
    let authenticator = Arc::new(Authenticator::new(hasher, tokens.clone()));
    let tokens = Arc::new(tokens);

    match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
            serve(&config, repository, authenticator, tokens).await
        }
        None => {
            tracing::warn!("No database.url configured, accounts are kept in memory");

            let repository = Arc::new(InMemoryAccountRepository::new());
            serve(&config, repository, authenticator, tokens).await
        }
    }
}

async fn serve<AR: AccountRepository>(
    config: &Config,
    repository: Arc<AR>,
    authenticator: Arc<Authenticator<Argon2Hasher>>,
    tokens: Arc<TokenProvider>,
) -> Result<(), anyhow::Error> {
    let auth_service = Arc::new(AuthService::new(repository, authenticator));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(auth_service, tokens);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
