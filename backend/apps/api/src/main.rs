//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use account::{AccountConfig, InMemoryAccountRepository, PgAccountRepository};
use axum::{
    Json, Router, http,
    http::{Method, header},
    routing::get,
};
use anyhow::Context;
use base64::Engine;
use base64::engine::general_purpose;
use serde::Serialize;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,account=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let account_config = load_account_config()?;

    // Storage: PostgreSQL when configured, in-memory otherwise
    let account_routes = match env::var("DATABASE_URL") {
        Ok(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            account::account_router(PgAccountRepository::new(pool), account_config)
        }
        Err(_) => {
            tracing::warn!("DATABASE_URL not set, accounts are kept in memory only");
            account::account_router_generic(InMemoryAccountRepository::new(), account_config)
        }
    };

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    let app = app(account_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr: SocketAddr = env::var("BIND_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build account configuration from the environment
///
/// `SECRET_KEY` (base64) is mandatory in release builds; debug builds fall
/// back to a random key and cheap hashing.
fn load_account_config() -> anyhow::Result<AccountConfig> {
    let mut config = match env::var("SECRET_KEY") {
        Ok(secret_b64) => {
            let secret = general_purpose::STANDARD
                .decode(secret_b64.trim())
                .context("SECRET_KEY must be base64")?;
            anyhow::ensure!(secret.len() >= 32, "SECRET_KEY must decode to at least 32 bytes");
            AccountConfig {
                token_secret: secret,
                ..AccountConfig::default()
            }
        }
        Err(_) if cfg!(debug_assertions) => {
            tracing::warn!("SECRET_KEY not set, using a random key; tokens die with the process");
            AccountConfig::development()
        }
        Err(_) => anyhow::bail!("SECRET_KEY must be set in production"),
    };

    if let Ok(minutes) = env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
        config.token_ttl = parse_token_ttl(&minutes)?;
    }

    tracing::info!(
        token_ttl_secs = config.token_ttl.as_secs(),
        "Account configuration loaded"
    );

    Ok(config)
}

/// `ACCESS_TOKEN_EXPIRE_MINUTES`, refused when zero or beyond the account cap
fn parse_token_ttl(minutes: &str) -> anyhow::Result<Duration> {
    let minutes: u64 = minutes
        .trim()
        .parse()
        .context("ACCESS_TOKEN_EXPIRE_MINUTES must be a whole number")?;
    let ttl = Duration::from_secs(minutes.saturating_mul(60));

    AccountConfig::validate_token_ttl(ttl)
        .map_err(|reason| anyhow::anyhow!("ACCESS_TOKEN_EXPIRE_MINUTES out of range: {reason}"))
}

/// Top-level routes around the account API
fn app(account_routes: Router) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .nest("/api/v1/auth", account_routes)
}

#[derive(Serialize)]
struct WelcomeResponse {
    message: &'static str,
    version: &'static str,
    health: &'static str,
}

async fn root() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        message: "Welcome to Cuest API",
        version: API_VERSION,
        health: "/health",
    })
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: API_VERSION,
    })
}
