use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderValue}, Method};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};

use crate::models::{NewPatient, Patient};
use super::PatientRepository;

const TABLE_PATH: &str = "/rest/v1/patients";

pub struct SupabasePatientRepository {
    supabase: SupabaseClient,
}

impl SupabasePatientRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }
}

#[async_trait]
impl PatientRepository for SupabasePatientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, DatabaseError> {
        debug!("Fetching patient {}", id);

        let path = format!("{}?id=eq.{}&limit=1", TABLE_PATH, id);
        let rows: Vec<Patient> = self.supabase.request(Method::GET, &path, None, None).await?;

        Ok(rows.into_iter().next())
    }

    async fn insert(&self, patient: NewPatient) -> Result<Patient, DatabaseError> {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));

        let mut body = serde_json::to_value(&patient)?;
        body["active"] = serde_json::Value::Bool(true);

        let rows: Vec<Patient> = self.supabase.request_with_headers(
            Method::POST,
            TABLE_PATH,
            None,
            Some(body),
            Some(headers),
        ).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DatabaseError::InvalidRequest("insert returned no representation".to_string()))
    }
}
