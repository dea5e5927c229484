use std::sync::Arc;

use axum::{extract::State, Json};
use tracing::debug;

use shared_config::AppConfig;

use crate::models::ContactDetails;

#[axum::debug_handler]
pub async fn get_contact_details(
    State(config): State<Arc<AppConfig>>,
) -> Json<ContactDetails> {
    debug!("Serving contact details");
    Json(ContactDetails::from(&config.contact))
}
