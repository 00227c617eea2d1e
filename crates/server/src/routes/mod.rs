use axum::{http::HeaderValue, routing::get, Router};
use shared::api::Object;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::{warn, Level};

use crate::AppState;

pub mod categories;
pub mod exercises;
pub mod ping;
pub mod workouts;

/// Builds the full application router with its layers and state
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.args.cors_origin);

    Router::new()
        .route(Object::Root.path(), get(ping::root))
        .route(Object::Ping.path(), get(ping::ping))
        .merge(categories::router::<AppState>())
        .merge(workouts::router::<AppState>())
        .merge(exercises::router::<AppState>())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .with_state(state)
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(origin) => layer.allow_origin(origin),
        Err(e) => {
            warn!(origin, ?e, "Invalid cors origin, allowing any origin");
            layer.allow_origin(Any)
        }
    }
}
