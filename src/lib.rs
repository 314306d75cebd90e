pub mod client;
pub mod config;
pub mod db;
pub mod errors;
pub mod http;
pub mod middleware;
pub mod models;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use config::ServerConfig;
use db::{PgFeedbackStore, ensure_schema};
use errors::AppError;
use middleware::{
    cors_layer, create_global_rate_limiter, handle_panic, not_found_fallback,
    rate_limit_middleware,
};
use sqlx::postgres::PgPoolOptions;
use state::AppState;
use std::net::SocketAddr;
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let global_rate_limiter = create_global_rate_limiter(config.rate_limit_per_minute);

    http::create_http_routes(state)
        .fallback(not_found_fallback)
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(global_rate_limiter.clone(), req, next)
        }))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(cors_layer(config.allowed_origins.as_deref())),
        )
}

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = ServerConfig::from_env()?;

    let postgres = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .map_err(|e| AppError::database("Failed to connect to database", e))?;

    ensure_schema(&postgres).await?;

    let state = AppState::new(PgFeedbackStore::new(postgres));
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to bind address: {}", e)))?;

    tracing::info!("Server is running on http://localhost:{}", config.port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| AppError::InternalError(format!("Server error: {}", e)))
}
