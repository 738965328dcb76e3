//! Server setup and initialization
//!
//! Wires storage and session backends from configuration and runs the server.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::{info, warn};
use warbler_cache::{MemorySessionStore, RedisPool, RedisSessionStore};
use warbler_common::{AppConfig, AppError, SessionTokenService, StorageBackend};
use warbler_core::{
    FollowRepository, MessageRepository, SessionStore, SnowflakeGenerator, UserRepository,
};
use warbler_db::{
    create_pool, ensure_schema, MemoryStore, PgFollowRepository, PgMessageRepository,
    PgUserRepository,
};
use warbler_service::ServiceContextBuilder;

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

type Repositories = (
    Arc<dyn UserRepository>,
    Arc<dyn FollowRepository>,
    Arc<dyn MessageRepository>,
);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let router = create_router();
    let router = apply_middleware(router);
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    config
        .validate()
        .map_err(|e| AppError::Config(e.to_string()))?;

    let (user_repo, follow_repo, message_repo) = create_repositories(&config).await?;
    let session_store = create_session_store(&config).await?;

    let session_tokens = Arc::new(SessionTokenService::new(
        &config.session.secret,
        config.session.ttl_seconds,
    ));
    let snowflake_generator = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));

    let service_context = ServiceContextBuilder::new()
        .user_repo(user_repo)
        .follow_repo(follow_repo)
        .message_repo(message_repo)
        .session_store(session_store)
        .session_tokens(session_tokens)
        .snowflake_generator(snowflake_generator)
        .message_max_length(config.messages.max_length)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

async fn create_repositories(config: &AppConfig) -> Result<Repositories, AppError> {
    match config.storage {
        StorageBackend::Postgres => {
            let db = config
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&warbler_db::DatabaseConfig::from(db))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            ensure_schema(&pool)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            let user_repo: Arc<dyn UserRepository> = Arc::new(PgUserRepository::new(pool.clone()));
            let follow_repo: Arc<dyn FollowRepository> =
                Arc::new(PgFollowRepository::new(pool.clone()));
            let message_repo: Arc<dyn MessageRepository> =
                Arc::new(PgMessageRepository::new(pool));
            Ok((user_repo, follow_repo, message_repo))
        }
        StorageBackend::Memory => {
            warn!("Using in-memory storage; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            let user_repo: Arc<dyn UserRepository> = store.clone();
            let follow_repo: Arc<dyn FollowRepository> = store.clone();
            let message_repo: Arc<dyn MessageRepository> = store;
            Ok((user_repo, follow_repo, message_repo))
        }
    }
}

async fn create_session_store(config: &AppConfig) -> Result<Arc<dyn SessionStore>, AppError> {
    match &config.redis {
        Some(redis) => {
            info!("Connecting to Redis...");
            let pool = RedisPool::from_config(redis).map_err(|e| AppError::Cache(e.to_string()))?;
            pool.health_check()
                .await
                .map_err(|e| AppError::Cache(e.to_string()))?;
            info!("Redis connection established");
            Ok(Arc::new(RedisSessionStore::new(pool)))
        }
        None => {
            info!("REDIS_URL not set, keeping sessions in memory");
            Ok(Arc::new(MemorySessionStore::new()))
        }
    }
}

/// Serve `app` on an already bound listener until Ctrl-C
pub async fn run_server(app: Router, listener: TcpListener) -> Result<(), AppError> {
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Config(format!("Failed to read local address: {e}")))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    info!("Server stopped");
    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let address = config.api.address();

    let state = create_app_state(config).await?;
    let app = create_app(state);

    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {address}: {e}")))?;

    run_server(app, listener).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
