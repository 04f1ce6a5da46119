use axum::{routing::get, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

mod error;
mod feature_flags;
mod health;

pub use health::health;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api",
            Router::new().route("/feature-flags", get(feature_flags::routes::get)),
        )
        .layer(CatchPanicLayer::custom(error::handle_panic))
        .layer(TraceLayer::new_for_http())
}
