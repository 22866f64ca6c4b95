#![allow(dead_code)]

use std::sync::Arc;

use account_service::domain::account::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use auth::Argon2Hasher;
use auth::Authenticator;
use auth::TokenProvider;
use chrono::Duration;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

pub const PASSWORD: &str = "pass_word!";

/// Test application that spawns a real server backed by the in-memory store
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub repository: Arc<InMemoryAccountRepository>,
    pub api_client: reqwest::Client,
    pub tokens: TokenProvider,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        Self::spawn_with_lifetimes(Duration::hours(24), Duration::days(7)).await
    }

    /// Spawn with custom token lifetimes; negative lifetimes issue tokens
    /// that are already expired.
    pub async fn spawn_with_lifetimes(access: Duration, refresh: Duration) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let repository = Arc::new(InMemoryAccountRepository::new());

        // Cheap argon2 costs keep the suite fast
        let hasher = Argon2Hasher::with_params(1024, 1, 1).expect("Invalid argon2 params");
        let tokens =
            TokenProvider::new(JWT_SECRET, access, refresh).expect("Failed to create provider");
        let authenticator = Arc::new(Authenticator::new(hasher, tokens.clone()));

        let auth_service = Arc::new(AuthService::new(Arc::clone(&repository), authenticator));
        let router = create_router(auth_service, Arc::new(tokens.clone()));

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            repository,
            api_client: reqwest::Client::new(),
            tokens,
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

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    pub async fn signup(&self, email: &str, nickname: &str) -> reqwest::Response {
        self.post("/api/auth/signup")
            .json(&json!({
                "email": email,
                "password": PASSWORD,
                "nickname": nickname
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn refresh(&self, refresh_token: &str) -> reqwest::Response {
        self.post("/api/auth/refresh")
            .header("Refresh-Token", refresh_token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Sign up and log in, returning the `data` of the token response
    pub async fn signup_and_login(&self, email: &str, nickname: &str) -> Value {
        let response = self.signup(email, nickname).await;
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let response = self.login(email, PASSWORD).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }
}

/// Throwaway PostgreSQL database with migrations applied
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    admin_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server named by
    /// `DATABASE_URL`, or `None` when that variable is unset.
    pub async fn from_env() -> Option<Self> {
        let admin_url = std::env::var("DATABASE_URL").ok()?;
        Some(Self::new(admin_url).await)
    }

    async fn new(admin_url: String) -> Self {
        let db_name = format!(
            "test_account_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&admin_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = admin_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Self {
            pool,
            db_name,
            admin_url,
        }
    }

    /// Soft-delete by email the way an administrative update would
    pub async fn soft_delete(&self, email: &str) {
        sqlx::query(
            r#"
            UPDATE accounts SET deleted = TRUE, updated_at = NOW()
            WHERE email = $1 AND deleted = FALSE
            "#,
        )
        .bind(email)
        .execute(&self.pool)
        .await
        .expect("Failed to soft-delete account");
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let admin_url = self.admin_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&admin_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
