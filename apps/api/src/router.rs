use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{appointment_routes, AppointmentService, AppointmentRouterState};
use contact_cell::contact_routes;
use shared_config::AppConfig;

pub fn create_router(config: Arc<AppConfig>, service: Arc<AppointmentService>) -> Router {
    Router::new()
        .route("/", get(|| async { "Appointment booking API is running!" }))
        .nest("/appointments", appointment_routes(AppointmentRouterState::new(config.clone(), service)))
        .nest("/contact", contact_routes(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}};
    use tower::ServiceExt;

    use shared_config::{ContactSettings, StorageBackend};

    fn app() -> Router {
        let config = Arc::new(AppConfig {
            supabase_url: String::new(),
            supabase_anon_key: String::new(),
            supabase_jwt_secret: "router-test-secret".to_string(),
            storage_backend: StorageBackend::Memory,
            port: 0,
            seed_provider_ids: vec![1],
            contact: ContactSettings::default(),
        });
        let service = Arc::new(AppointmentService::from_config(&config));
        create_router(config, service)
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        app().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_mounts_cells() {
        assert_eq!(status_of("/").await, StatusCode::OK);
        assert_eq!(status_of("/contact").await, StatusCode::OK);
        // Reachable, but guarded by the auth middleware
        assert_eq!(status_of("/appointments").await, StatusCode::UNAUTHORIZED);
        assert_eq!(status_of("/nowhere").await, StatusCode::NOT_FOUND);
    }
}
