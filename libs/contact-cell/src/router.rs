use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

/// Public routes; no authentication required.
pub fn contact_routes(config: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::get_contact_details))
        .with_state(config)
}
