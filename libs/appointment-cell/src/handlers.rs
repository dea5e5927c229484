// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Extension, Path, State,
    },
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use shared_models::auth::User;
use shared_models::error::AppError;

use crate::models::AppointmentError;
use crate::router::AppointmentRouterState;
use crate::services::validation::validate_booking;

impl From<AppointmentError> for AppError {
    fn from(err: AppointmentError) -> Self {
        match err {
            AppointmentError::ValidationError(reason) => {
                debug!("Booking payload rejected: {}", reason);
                AppError::ValidationError("Validation fails".to_string())
            }
            AppointmentError::NotAProvider | AppointmentError::Forbidden => {
                AppError::Auth(err.to_string())
            }
            AppointmentError::PastDate
            | AppointmentError::SlotUnavailable
            | AppointmentError::AlreadyCanceled => AppError::BadRequest(err.to_string()),
            AppointmentError::NotFound => AppError::NotFound(err.to_string()),
            AppointmentError::DatabaseError(msg) => AppError::Database(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<AppointmentRouterState>,
    Extension(user): Extension<User>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(payload) = payload.map_err(|rejection| {
        AppointmentError::ValidationError(rejection.body_text())
    })?;

    let booking = validate_booking(&payload)?;
    let appointment = state.service.create(booking, user.id).await?;

    Ok(Json(json!({
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn list_appointments(
    State(state): State<AppointmentRouterState>,
    Extension(user): Extension<User>,
) -> Result<Json<Value>, AppError> {
    let appointments = state.service.list(user.id).await?;

    Ok(Json(json!({
        "appointments": appointments
    })))
}

#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<AppointmentRouterState>,
    Extension(user): Extension<User>,
    appointment_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Value>, AppError> {
    let Path(appointment_id) = appointment_id.map_err(|rejection| {
        AppointmentError::ValidationError(rejection.body_text())
    })?;

    let appointment = state.service.cancel(appointment_id, user.id).await?;

    Ok(Json(json!(appointment)))
}
