use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderValue}, Method};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{Appointment, NewAppointment};
use super::AppointmentRepository;

const TABLE_PATH: &str = "/rest/v1/appointments";

pub struct SupabaseAppointmentRepository {
    supabase: SupabaseClient,
}

impl SupabaseAppointmentRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl AppointmentRepository for SupabaseAppointmentRepository {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, DatabaseError> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let rows: Vec<Appointment> = self.supabase.request_with_headers(
            Method::POST,
            TABLE_PATH,
            None,
            Some(serde_json::to_value(&appointment)?),
            Some(headers),
        ).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DatabaseError::InvalidRequest("insert returned no representation".to_string()))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, DatabaseError> {
        debug!("Fetching appointment {}", id);

        let path = format!("{}?id=eq.{}&limit=1", TABLE_PATH, id);
        let rows: Vec<Appointment> = self.supabase.request(Method::GET, &path, None, None).await?;

        Ok(rows.into_iter().next())
    }
}
