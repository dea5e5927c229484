use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::models::{Actor, Appointment, NewAppointment, StoreError};
use crate::services::repository::{ActorDirectory, AppointmentRepository};

#[derive(Default)]
struct StoreState {
    next_id: i64,
    rows: BTreeMap<i64, Appointment>,
}

/// Process-local appointment table.
///
/// Every write takes the single write lock, so the slot check inside
/// `create` and the insert cannot interleave with another booking.
#[derive(Default)]
pub struct InMemoryAppointmentStore {
    state: RwLock<StoreState>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a row as-is, bypassing the slot check. Later ids continue
    /// after the highest id seen.
    pub async fn insert(&self, appointment: Appointment) {
        let mut state = self.state.write().await;
        state.next_id = state.next_id.max(appointment.id);
        state.rows.insert(appointment.id, appointment);
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentStore {
    async fn find_active_in_slot(
        &self,
        provider_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .rows
            .values()
            .find(|row| row.occupies_slot(provider_id, date))
            .cloned())
    }

    async fn list_active_for_provider(&self, provider_id: i64) -> Result<Vec<Appointment>, StoreError> {
        let state = self.state.read().await;
        let mut rows: Vec<Appointment> = state
            .rows
            .values()
            .filter(|row| row.provider_id == provider_id && !row.is_canceled())
            .cloned()
            .collect();
        rows.sort_by_key(|row| (row.date, row.id));
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, StoreError> {
        Ok(self.state.read().await.rows.get(&id).cloned())
    }

    async fn create(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let mut state = self.state.write().await;

        if state
            .rows
            .values()
            .any(|row| row.occupies_slot(appointment.provider_id, appointment.date))
        {
            return Err(StoreError::SlotTaken);
        }

        state.next_id += 1;
        let row = Appointment {
            id: state.next_id,
            user_id: Some(appointment.user_id),
            provider_id: appointment.provider_id,
            date: appointment.date,
            canceled_at: None,
            created_at: appointment.created_at,
            updated_at: appointment.updated_at,
        };
        state.rows.insert(row.id, row.clone());

        debug!("Stored appointment {} in memory", row.id);
        Ok(row)
    }

    async fn mark_canceled(
        &self,
        id: i64,
        canceled_at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let mut state = self.state.write().await;

        match state.rows.get_mut(&id) {
            Some(row) if row.canceled_at.is_none() => {
                row.canceled_at = Some(canceled_at);
                row.updated_at = canceled_at;
                Ok(Some(row.clone()))
            }
            _ => Ok(None),
        }
    }
}

/// Process-local actor table.
#[derive(Default)]
pub struct InMemoryActorDirectory {
    actors: RwLock<HashMap<i64, Actor>>,
}

impl InMemoryActorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_providers(ids: impl IntoIterator<Item = i64>) -> Self {
        let actors = ids
            .into_iter()
            .map(|id| (id, Actor { id, is_provider: true }))
            .collect();
        Self { actors: RwLock::new(actors) }
    }

    pub async fn insert(&self, actor: Actor) {
        self.actors.write().await.insert(actor.id, actor);
    }
}

#[async_trait]
impl ActorDirectory for InMemoryActorDirectory {
    async fn find_provider(&self, actor_id: i64) -> Result<Option<Actor>, StoreError> {
        Ok(self
            .actors
            .read()
            .await
            .get(&actor_id)
            .filter(|actor| actor.is_provider)
            .cloned())
    }
}
