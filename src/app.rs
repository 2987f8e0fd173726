use axum::Router;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::routes::message_routes;
use crate::state::message::MessageStore;

/// Build the complete Axum application:
/// - /message       (list + create)
/// - /message/{id}  (update + delete)
///
/// Every handler shares `store`.
pub fn build_app(store: MessageStore) -> Router {
    Router::new()
        // /message/*
        .nest("/message", message_routes::routes(store))

        // Logging middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}
