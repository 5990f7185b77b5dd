//! API layer - HTTP entry points.

pub mod docs;
pub mod error;
pub mod http;

use std::sync::Arc;

use axum::Router;

use crate::app::App;

pub use error::ApiError;

/// Every route the engine serves, bound to the application state.
pub fn router(app: Arc<App>) -> Router {
    Router::new()
        .merge(http::routes())
        .merge(docs::routes())
        .with_state(app)
}
