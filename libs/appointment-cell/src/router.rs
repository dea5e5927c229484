// libs/appointment-cell/src/router.rs
use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get},
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::AppointmentService;

#[derive(Clone)]
pub struct AppointmentRouterState {
    pub config: Arc<AppConfig>,
    pub service: Arc<AppointmentService>,
}

impl AppointmentRouterState {
    pub fn new(config: Arc<AppConfig>, service: Arc<AppointmentService>) -> Self {
        Self { config, service }
    }
}

pub fn appointment_routes(state: AppointmentRouterState) -> Router {
    // Every operation acts on behalf of the authenticated actor
    Router::new()
        .route("/", get(handlers::list_appointments).post(handlers::create_appointment))
        .route("/{appointment_id}", delete(handlers::cancel_appointment))
        .layer(middleware::from_fn_with_state(state.config.clone(), auth_middleware))
        .with_state(state)
}
