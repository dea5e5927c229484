use std::sync::Arc;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use tower::ServiceExt;

use contact_cell::{contact_routes, ContactDetails};
use shared_config::{AppConfig, ContactSettings, StorageBackend};

fn config_with(contact: ContactSettings) -> Arc<AppConfig> {
    Arc::new(AppConfig {
        supabase_url: String::new(),
        supabase_anon_key: String::new(),
        supabase_jwt_secret: String::new(),
        storage_backend: StorageBackend::Memory,
        port: 0,
        seed_provider_ids: vec![],
        contact,
    })
}

async fn fetch(config: Arc<AppConfig>) -> (StatusCode, ContactDetails) {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = contact_routes(config).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_contact_details_default_values() {
    let (status, details) = fetch(config_with(ContactSettings::default())).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(details.phone, "+83 00000000");
    assert_eq!(details.twitter, "twitter.com/joeberth");
}

#[tokio::test]
async fn test_contact_details_are_public_and_configurable() {
    let contact = ContactSettings {
        email: "hello@example.com".to_string(),
        ..ContactSettings::default()
    };

    let (status, details) = fetch(config_with(contact)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(details.email, "hello@example.com");
    assert_eq!(details.address, ContactSettings::default().address);
}
