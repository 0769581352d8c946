use std::net::AddrParseError;
use std::sync::Arc;

use tower_http::timeout::TimeoutLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use screening_bot::adapters::http::{screening_routes, ScreeningAppState};
use screening_bot::adapters::{
    EnvPolicySource, InMemoryRateLimiter, InMemorySessionStore, RedisRateLimiter,
    RedisSessionStore, TelegramPresenter, WebhookResultSink,
};
use screening_bot::application::ConversationEngine;
use screening_bot::config::{AppConfig, ServerConfig};
use screening_bot::domain::screening::QuestionCatalog;
use screening_bot::ports::{RateLimiter, SessionStore};

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error("invalid listen address: {0}")]
    Addr(#[from] AddrParseError),

    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("redis connection timed out")]
    RedisTimeout,

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config: {e}");
            std::process::exit(1);
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("invalid config: {e}");
        std::process::exit(1);
    }

    init_tracing(&config.server);

    if let Err(e) = run(config).await {
        tracing::error!("server exited with error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(server: &ServerConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if server.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false))
            .init();
    }
}

async fn stores(
    config: &AppConfig,
) -> Result<(Arc<dyn SessionStore>, Arc<dyn RateLimiter>), StartupError> {
    let ttl = config.screening.session_ttl_secs;
    let limits = config.rate_limit.clone();

    if !config.redis.is_enabled() {
        tracing::warn!("No Redis URL configured, sessions and rate limits stay in process memory");
        return Ok((
            Arc::new(InMemorySessionStore::new(ttl)),
            Arc::new(InMemoryRateLimiter::new(limits)),
        ));
    }

    let client = redis::Client::open(config.redis.url.as_str())?;
    let conn = tokio::time::timeout(
        config.redis.timeout(),
        client.get_multiplexed_tokio_connection(),
    )
    .await
    .map_err(|_| StartupError::RedisTimeout)??;

    tracing::info!("Connected to Redis");
    Ok((
        Arc::new(RedisSessionStore::new(conn.clone(), ttl)),
        Arc::new(RedisRateLimiter::new(conn, limits)),
    ))
}

async fn run(config: AppConfig) -> Result<(), StartupError> {
    let addr = config.server.socket_addr()?;
    let (store, limiter) = stores(&config).await?;

    let engine = ConversationEngine::new(
        QuestionCatalog::for_variant(config.screening.variant),
        limiter,
        store,
        Arc::new(TelegramPresenter::new(
            &config.telegram,
            config.server.request_timeout(),
        )),
        Arc::new(EnvPolicySource::new(config.screening.policy())),
        Arc::new(WebhookResultSink::from_config(&config.reporting)),
    );

    let state = ScreeningAppState::new(Arc::new(engine), config.telegram.webhook_secret.clone());
    let app = screening_routes(state).layer(TimeoutLayer::new(config.server.request_timeout()));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(
        %addr,
        variant = ?config.screening.variant,
        environment = ?config.server.environment,
        "Screening bot listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
