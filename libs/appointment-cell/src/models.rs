// libs/appointment-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ==============================================================================
// CORE MODELS
// ==============================================================================

/// An identified account as seen by the booking core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    #[serde(rename = "provider")]
    pub is_provider: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    pub user_id: Option<i64>,
    pub provider_id: i64,
    pub date: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    pub fn state(&self) -> AppointmentState {
        if self.canceled_at.is_some() {
            AppointmentState::Canceled
        } else {
            AppointmentState::Scheduled
        }
    }

    pub fn is_canceled(&self) -> bool {
        self.state() == AppointmentState::Canceled
    }

    /// Whether this row holds the (provider, hour) slot exclusively.
    pub fn occupies_slot(&self, provider_id: i64, date: DateTime<Utc>) -> bool {
        !self.is_canceled()
            && self.user_id.is_some()
            && self.provider_id == provider_id
            && self.date == date
    }
}

/// `Scheduled -> Canceled` is the only transition; `Canceled` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentState {
    Scheduled,
    Canceled,
}

impl fmt::Display for AppointmentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentState::Scheduled => write!(f, "scheduled"),
            AppointmentState::Canceled => write!(f, "canceled"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

/// A booking request that passed shape validation. `date` is as submitted,
/// not yet truncated to the hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedBooking {
    pub provider_id: i64,
    pub user_id: i64,
    pub date: DateTime<Utc>,
}

/// Row written by `AppointmentRepository::create`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewAppointment {
    pub user_id: i64,
    pub provider_id: i64,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ==============================================================================
// ERROR MODELS
// ==============================================================================

#[derive(Error, Debug)]
pub enum AppointmentError {
    #[error("Validation fails: {0}")]
    ValidationError(String),

    #[error("You can only create appointment with providers")]
    NotAProvider,

    #[error("Past dates are not permitted")]
    PastDate,

    #[error("Appointment date is not available")]
    SlotUnavailable,

    #[error("Appointment not found")]
    NotFound,

    #[error("You dont have permission to cancel this appointment")]
    Forbidden,

    #[error("Appointment is already canceled")]
    AlreadyCanceled,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Failures reported by the datastore collaborators.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("slot is already booked")]
    SlotTaken,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<StoreError> for AppointmentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::SlotTaken => AppointmentError::SlotUnavailable,
            StoreError::Backend(e) => AppointmentError::DatabaseError(e.to_string()),
        }
    }
}
