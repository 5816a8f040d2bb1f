pub mod health;
pub mod page;
pub mod upload;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router with its middleware stack.
pub fn app(state: AppState) -> Router {
    let body_limit = state.config().max_file_size;

    Router::new()
        .merge(health::router())
        .merge(page::router())
        .merge(upload::router())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
