//! Memo Board Service, a standalone binary serving the categories/memos API.
//!
//! Default: http://127.0.0.1:8080/

use memo_board_service::config::Config;
use memo_board_service::db::Database;
use memo_board_service::{router, AppState};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    log::info!("Opening database at: {}", config.database_path);
    let database = Arc::new(
        Database::open(&config.database_path, config.pool_size).expect("Failed to open database"),
    );

    let state = Arc::new(AppState::new(database));

    let cors = tower_http::cors::CorsLayer::permissive();
    let app = router(state).layer(cors);

    let addr = config.bind_addr();
    log::info!("Memo Board Service listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    log::info!("Memo Board Service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received");
}
