// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use tracing::{debug, info, warn};

use shared_config::{AppConfig, StorageBackend};
use shared_database::SupabaseClient;

use crate::models::{Appointment, AppointmentError, NewAppointment, ValidatedBooking};
use crate::services::clock::{Clock, SystemClock};
use crate::services::memory::{InMemoryActorDirectory, InMemoryAppointmentStore};
use crate::services::repository::{ActorDirectory, AppointmentRepository};
use crate::services::supabase_store::{SupabaseActorDirectory, SupabaseAppointmentStore};
use crate::services::validation::start_of_hour;

pub struct AppointmentService {
    appointments: Arc<dyn AppointmentRepository>,
    actors: Arc<dyn ActorDirectory>,
    clock: Arc<dyn Clock>,
}

impl AppointmentService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        actors: Arc<dyn ActorDirectory>,
    ) -> Self {
        Self::with_clock(appointments, actors, Arc::new(SystemClock))
    }

    pub fn with_clock(
        appointments: Arc<dyn AppointmentRepository>,
        actors: Arc<dyn ActorDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { appointments, actors, clock }
    }

    /// Wires the datastore selected by `STORAGE_BACKEND`.
    pub fn from_config(config: &AppConfig) -> Self {
        match config.storage_backend {
            StorageBackend::Supabase => {
                info!("Using Supabase appointment store at {}", config.supabase_url);
                let supabase = Arc::new(SupabaseClient::new(config));
                Self::new(
                    Arc::new(SupabaseAppointmentStore::new(Arc::clone(&supabase))),
                    Arc::new(SupabaseActorDirectory::new(supabase)),
                )
            }
            StorageBackend::Memory => {
                info!(
                    "Using in-memory appointment store with {} seeded providers",
                    config.seed_provider_ids.len()
                );
                Self::new(
                    Arc::new(InMemoryAppointmentStore::new()),
                    Arc::new(InMemoryActorDirectory::with_providers(
                        config.seed_provider_ids.iter().copied(),
                    )),
                )
            }
        }
    }

    /// Books a slot.
    ///
    /// Checks run in a fixed order, all before the single write: provider,
    /// then future date, then slot exclusivity.
    pub async fn create(
        &self,
        booking: ValidatedBooking,
        requester_id: i64,
    ) -> Result<Appointment, AppointmentError> {
        debug!(
            "Actor {} booking provider {} for user {} at {}",
            requester_id, booking.provider_id, booking.user_id, booking.date
        );

        if self.actors.find_provider(booking.provider_id).await?.is_none() {
            warn!("Actor {} is not a provider", booking.provider_id);
            return Err(AppointmentError::NotAProvider);
        }

        let hour_start = start_of_hour(booking.date)?;
        let now = self.clock.now();
        if hour_start <= now {
            warn!("Rejected booking for past slot {} (now: {})", hour_start, now);
            return Err(AppointmentError::PastDate);
        }

        if self
            .appointments
            .find_active_in_slot(booking.provider_id, hour_start)
            .await?
            .is_some()
        {
            warn!("Slot {} already taken for provider {}", hour_start, booking.provider_id);
            return Err(AppointmentError::SlotUnavailable);
        }

        let appointment = self
            .appointments
            .create(NewAppointment {
                user_id: booking.user_id,
                provider_id: booking.provider_id,
                date: hour_start,
                created_at: now,
                updated_at: now,
            })
            .await?;

        info!(
            "Appointment {} booked with provider {} at {}",
            appointment.id, appointment.provider_id, appointment.date
        );
        Ok(appointment)
    }

    /// Scheduled appointments of the requesting provider, earliest first.
    pub async fn list(&self, requester_id: i64) -> Result<Vec<Appointment>, AppointmentError> {
        let appointments = self.appointments.list_active_for_provider(requester_id).await?;
        debug!("Provider {} has {} scheduled appointments", requester_id, appointments.len());
        Ok(appointments)
    }

    /// Cancels an appointment owned by the requesting provider.
    ///
    /// A second cancellation is rejected with `AlreadyCanceled` and leaves
    /// `canceled_at` untouched. Returns only after the write is stored.
    pub async fn cancel(
        &self,
        appointment_id: i64,
        requester_id: i64,
    ) -> Result<Appointment, AppointmentError> {
        let appointment = self
            .appointments
            .find_by_id(appointment_id)
            .await?
            .ok_or(AppointmentError::NotFound)?;

        if appointment.provider_id != requester_id {
            warn!(
                "Actor {} tried to cancel appointment {} owned by provider {}",
                requester_id, appointment_id, appointment.provider_id
            );
            return Err(AppointmentError::Forbidden);
        }

        if appointment.is_canceled() {
            return Err(AppointmentError::AlreadyCanceled);
        }

        // The conditional update loses to a concurrent cancel; the row itself
        // cannot disappear since rows are never deleted.
        let canceled = self
            .appointments
            .mark_canceled(appointment_id, self.clock.now())
            .await?
            .ok_or(AppointmentError::AlreadyCanceled)?;

        info!("Appointment {} canceled by provider {}", canceled.id, requester_id);
        Ok(canceled)
    }
}
