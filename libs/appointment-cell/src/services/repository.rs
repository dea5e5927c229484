use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{Actor, Appointment, NewAppointment, StoreError};

/// Persistence for appointments. Rows are never deleted.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// The non-canceled appointment with a non-null user holding this slot.
    async fn find_active_in_slot(
        &self,
        provider_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError>;

    /// Non-canceled appointments of a provider, ascending by `date`.
    async fn list_active_for_provider(&self, provider_id: i64) -> Result<Vec<Appointment>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, StoreError>;

    /// Inserts the row unless the slot is already held, in which case
    /// [`StoreError::SlotTaken`] is returned. Check and insert are atomic.
    async fn create(&self, appointment: NewAppointment) -> Result<Appointment, StoreError>;

    /// Sets `canceled_at` on a row that is not canceled yet. Returns `None`
    /// when no such row exists.
    async fn mark_canceled(
        &self,
        id: i64,
        canceled_at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError>;
}

/// Lookup of actors owned by the identity collaborator.
#[async_trait]
pub trait ActorDirectory: Send + Sync {
    /// The actor with this id, only if it is a provider.
    async fn find_provider(&self, actor_id: i64) -> Result<Option<Actor>, StoreError>;
}
