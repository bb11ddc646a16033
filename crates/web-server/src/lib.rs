use axum::{middleware, routing::get, Router};
use configuration::Config;
use database::DbRepository;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod extract;
pub mod handlers;

/// The shared application state that all handlers can access.
#[derive(Clone)]
pub struct AppState {
    pub db_repo: DbRepository,
}

/// Builds the API router over an already-connected repository.
pub fn app(db_repo: DbRepository) -> Router {
    let app_state = Arc::new(AppState { db_repo });
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any());

    Router::new()
        .route("/events", get(handlers::list_events))
        .route("/events/:id/sessions", get(handlers::list_event_sessions))
        .route("/speakers", get(handlers::list_speakers))
        .route("/speakers/:id", get(handlers::get_speaker))
        .route("/sessions/:id/speakers", get(handlers::list_session_speakers))
        .route_layer(middleware::from_fn(extract::reject_non_integer_ids))
        .with_state(app_state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// Connects to the database, applies migrations when configured, and serves
/// the API until Ctrl-C.
pub async fn run_server(config: &Config) -> anyhow::Result<()> {
    let addr = config.server.socket_addr()?;

    let db_pool = database::connect(&config.database.url, config.database.max_connections).await?;
    if config.database.run_migrations {
        database::run_migrations(&db_pool).await?;
        tracing::info!("Database migrations applied.");
    }
    let app = app(DbRepository::new(db_pool));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Web server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Web server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C.");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received.");
}
