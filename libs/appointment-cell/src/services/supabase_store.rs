use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, warn};

use shared_database::{SupabaseApiError, SupabaseClient};

use crate::models::{Actor, Appointment, NewAppointment, StoreError};
use crate::services::repository::{ActorDirectory, AppointmentRepository};

const APPOINTMENTS_PATH: &str = "/rest/v1/appointments";
const USERS_PATH: &str = "/rest/v1/users";

fn timestamp(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Appointment table behind PostgREST.
///
/// Slot exclusivity relies on the partial unique index from
/// `migrations/0001_appointments.sql`; a violated index comes back as 409.
pub struct SupabaseAppointmentStore {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseAppointmentStore {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl AppointmentRepository for SupabaseAppointmentStore {
    async fn find_active_in_slot(
        &self,
        provider_id: i64,
        date: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let path = format!(
            "{}?provider_id=eq.{}&date=eq.{}&canceled_at=is.null&user_id=not.is.null&limit=1",
            APPOINTMENTS_PATH,
            provider_id,
            timestamp(date)
        );
        debug!("Checking slot availability for provider {} at {}", provider_id, date);

        let rows: Vec<Appointment> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn list_active_for_provider(&self, provider_id: i64) -> Result<Vec<Appointment>, StoreError> {
        let path = format!(
            "{}?provider_id=eq.{}&canceled_at=is.null&order=date.asc",
            APPOINTMENTS_PATH, provider_id
        );

        let rows: Vec<Appointment> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, StoreError> {
        let path = format!("{}?id=eq.{}&limit=1", APPOINTMENTS_PATH, id);

        let rows: Vec<Appointment> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }

    async fn create(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let body = serde_json::to_value(&appointment).map_err(anyhow::Error::from)?;

        let result: anyhow::Result<Vec<Appointment>> = self
            .supabase
            .request_with_headers(
                Method::POST,
                APPOINTMENTS_PATH,
                Some(body),
                Some(SupabaseClient::return_representation()),
            )
            .await;

        match result {
            Ok(rows) => rows
                .into_iter()
                .next()
                .ok_or_else(|| StoreError::Backend(anyhow!("insert returned no rows"))),
            Err(e) if e.downcast_ref::<SupabaseApiError>().is_some_and(SupabaseApiError::is_conflict) => {
                warn!(
                    "Unique slot index rejected booking for provider {} at {}",
                    appointment.provider_id, appointment.date
                );
                Err(StoreError::SlotTaken)
            }
            Err(e) => Err(StoreError::Backend(e)),
        }
    }

    async fn mark_canceled(
        &self,
        id: i64,
        canceled_at: DateTime<Utc>,
    ) -> Result<Option<Appointment>, StoreError> {
        let path = format!("{}?id=eq.{}&canceled_at=is.null", APPOINTMENTS_PATH, id);
        let body = json!({
            "canceled_at": timestamp(canceled_at),
            "updated_at": timestamp(canceled_at),
        });

        let rows: Vec<Appointment> = self
            .supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(body),
                Some(SupabaseClient::return_representation()),
            )
            .await?;

        Ok(rows.into_iter().next())
    }
}

/// Provider lookup against the `users` table.
pub struct SupabaseActorDirectory {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseActorDirectory {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }
}

#[async_trait]
impl ActorDirectory for SupabaseActorDirectory {
    async fn find_provider(&self, actor_id: i64) -> Result<Option<Actor>, StoreError> {
        let path = format!(
            "{}?id=eq.{}&provider=eq.true&select=id,provider&limit=1",
            USERS_PATH, actor_id
        );

        let rows: Vec<Actor> = self.supabase.request(Method::GET, &path, None).await?;
        Ok(rows.into_iter().next())
    }
}
