/*****************************************************************************************
 *
 *  message-store – In-memory Message CRUD Microservice in Rust
 *  -----------------------------------------------------------
 *
 *  GET /message, POST /message, PATCH /message/{id}, DELETE /message/{id}
 *  All state is volatile and lost on exit.
 *
 *****************************************************************************************/

use axum::serve;
use tokio::net::TcpListener;
use tracing_subscriber::FmtSubscriber;

use message_store::app;
use message_store::config::AppConfig;
use message_store::state::message::MessageStore;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let cfg = AppConfig::default();

    //
    // ────────────────────────────────────────────────────────
    //  Configure logging
    // ────────────────────────────────────────────────────────
    //
    let subscriber = FmtSubscriber::builder()
        .with_max_level(cfg.level_filter())
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {e}");
    }

    tracing::info!("Starting message-store…");
    tracing::info!("Configuration: {:?}", cfg);

    //
    // ────────────────────────────────────────────────────────
    //  Create store and build the app
    // ────────────────────────────────────────────────────────
    //
    let store = MessageStore::new();
    let app = app::build_app(store.clone());

    //
    // ────────────────────────────────────────────────────────
    //  Bind server and start listening
    // ────────────────────────────────────────────────────────
    //
    let addr = cfg.listen_addr();
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind {}: {}", addr, e);
        e
    })?;

    tracing::info!("Listening on http://{}", addr);

    serve(listener, app)
        .with_graceful_shutdown(shutdown(store))
        .await
}

//
// ─────────────────────────────────────────────────────────────
//  Graceful shutdown handler
// ─────────────────────────────────────────────────────────────
//
async fn shutdown(store: MessageStore) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Keep serving; the process can still be killed.
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::warn!("CTRL+C received, discarding {} messages", store.len());
    tracing::info!("Goodbye.");
}
