use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use atelier_api::config::ServerConfig;
use atelier_api::geo::build_geo_lookup;
use atelier_api::router::build_app_router;
use atelier_api::state::AppState;
use atelier_api::telemetry::init_tracing;
use tokio::sync::Notify;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    init_tracing("atelier_api=debug,tower_http=debug");

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
        .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a valid u32"))
        .unwrap_or(atelier_db::DEFAULT_MAX_CONNECTIONS);

    let pool = atelier_db::create_pool(&database_url, max_connections)
        .await
        .expect("Failed to connect to database");
    tracing::info!(max_connections, "Database connection pool created");

    atelier_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    atelier_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    if config.init_secret.is_none() {
        tracing::info!("INIT_SECRET not set, /api/init is disabled");
    }

    // --- App state ---
    let geo = build_geo_lookup(&config.geo);
    tracing::info!(enabled = config.geo.enabled, "Geolocation configured");

    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        geo,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    // The signal handler notifies `stopping` so the drain below can be bounded.
    let stopping = Arc::new(Notify::new());
    let signalled = Arc::clone(&stopping);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        signalled.notify_one();
    });

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    tokio::select! {
        result = async move { server.await } => {
            result.expect("Server error");
        }
        () = async {
            stopping.notified().await;
            tokio::time::sleep(drain).await;
        } => {
            tracing::warn!(timeout_secs = config.shutdown_timeout_secs, "Shutdown drain timed out, dropping open connections");
        }
    }

    pool.close().await;
    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
