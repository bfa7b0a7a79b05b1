use std::path::Path;

use axum::{
    routing::{any, get},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;

use crate::state::{JsonState, ServerState};

pub mod greeting;
pub mod html;
pub mod ping;
pub mod users;

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// HTML server: greeting, inline form, form echo, ping, and the static tree as fallback.
pub fn build_html_router<P: AsRef<Path>>(state: ServerState, static_dir: P) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/hi", any(html::hi))
        .route("/plainHtml", get(html::plain_html))
        .route("/form", get(html::plain_html).post(html::form_submit))
        .route("/ping", any(ping::ping))
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .with_state(state);
    with_layers(app)
}

/// JSON server: record lookups, form acknowledgement, ping, and a path greeting for everything else.
pub fn build_json_router(state: JsonState) -> Router {
    let app = Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list))
        .route("/form", any(greeting::form_ack))
        .route("/ping", any(ping::ping))
        .fallback(greeting::hello)
        .with_state(state);
    with_layers(app)
}

fn with_layers(app: Router) -> Router {
    app.layer(CorsLayer::very_permissive()).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
            // 5xx is logged at ERROR
            .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
    )
}
