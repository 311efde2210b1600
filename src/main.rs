use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use plenum_server::config::Config;
use plenum_server::hub::BroadcastHub;
use plenum_server::routes::create_routes;
use plenum_server::service::EventService;
use plenum_server::state::AppState;
use plenum_server::store::EventStore;

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env();

    let store = EventStore::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Successfully connected to database");

    store.migrate().await.expect("Failed to run migrations");

    tracing::info!("Migrations run successfully");

    if config.seed_demo {
        store.seed_demo().await.expect("Failed to seed demo data");
        tracing::info!("Database reset with the demo schedule");
    }

    let service = EventService::new(store.clone());
    let hub = Arc::new(BroadcastHub::new(service.clone()));
    let app = create_routes(AppState::new(service, hub), &config.static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Live timetable server running at http://{}", addr);
    tracing::info!("Delegate view: http://localhost:{}/", config.port);
    tracing::info!("Admin panel: http://localhost:{}/admin", config.port);

    let listener = TcpListener::bind(addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");

    store.close().await;
    tracing::info!("Database connection closed");
}

/// Resolves on Ctrl+C or, on unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down server...");
}
