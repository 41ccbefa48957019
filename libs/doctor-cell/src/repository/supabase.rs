use async_trait::async_trait;
use reqwest::{header::{HeaderMap, HeaderValue}, Method};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};
use shared_models::{Page, PageRequest};

use crate::models::{Doctor, NewDoctor};
use super::{DoctorRepository, RepositoryResult};

const TABLE_PATH: &str = "/rest/v1/doctors";

/// `doctors` table served through PostgREST. `crm` and `email` carry unique
/// indexes; `address` is a jsonb column.
pub struct SupabaseDoctorRepository {
    supabase: SupabaseClient,
}

impl SupabaseDoctorRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    async fn exists_by(&self, column: &str, value: &str) -> RepositoryResult<bool> {
        let path = format!(
            "{}?{}=eq.{}&select=id&limit=1",
            TABLE_PATH,
            column,
            urlencoding::encode(value)
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None, None).await?;
        Ok(!rows.is_empty())
    }

    fn representation_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Prefer", HeaderValue::from_static("return=representation"));
        headers
    }
}

#[async_trait]
impl DoctorRepository for SupabaseDoctorRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Doctor>> {
        debug!("Fetching doctor {}", id);

        let path = format!("{}?id=eq.{}&limit=1", TABLE_PATH, id);
        let rows: Vec<Doctor> = self.supabase.request(Method::GET, &path, None, None).await?;

        Ok(rows.into_iter().next())
    }

    async fn exists_by_crm(&self, crm: &str) -> RepositoryResult<bool> {
        self.exists_by("crm", crm).await
    }

    async fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        self.exists_by("email", email).await
    }

    async fn find_all_active(&self, page: &PageRequest) -> RepositoryResult<Page<Doctor>> {
        let path = format!(
            "{}?active=eq.true&order={}.{}&limit={}&offset={}",
            TABLE_PATH,
            page.sort.property,
            page.sort.direction.as_str(),
            page.size,
            page.offset()
        );
        debug!("Listing active doctors: {}", path);

        let (rows, total): (Vec<Doctor>, Option<u64>) =
            self.supabase.select_with_count(&path, None).await?;

        let total = total.unwrap_or_else(|| page.offset() + rows.len() as u64);
        Ok(Page::new(rows, page, total))
    }

    async fn insert(&self, doctor: NewDoctor) -> RepositoryResult<Doctor> {
        let body = serde_json::to_value(&doctor)?;

        let rows: Vec<Doctor> = self.supabase.request_with_headers(
            Method::POST,
            TABLE_PATH,
            None,
            Some(body),
            Some(Self::representation_headers()),
        ).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DatabaseError::InvalidRequest("insert returned no representation".to_string()))
    }

    async fn update_profile(&self, doctor: &Doctor) -> RepositoryResult<Doctor> {
        let path = format!("{}?id=eq.{}", TABLE_PATH, doctor.id);
        let body = json!({
            "name": doctor.name,
            "phone": doctor.phone,
            "address": doctor.address,
        });

        let rows: Vec<Doctor> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            None,
            Some(body),
            Some(Self::representation_headers()),
        ).await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| DatabaseError::NotFound(format!("doctor {}", doctor.id)))
    }

    async fn deactivate(&self, id: i64) -> RepositoryResult<()> {
        let path = format!("{}?id=eq.{}", TABLE_PATH, id);

        let rows: Vec<Value> = self.supabase.request_with_headers(
            Method::PATCH,
            &path,
            None,
            Some(json!({ "active": false })),
            Some(Self::representation_headers()),
        ).await?;

        if rows.is_empty() {
            return Err(DatabaseError::NotFound(format!("doctor {}", id)));
        }
        Ok(())
    }
}
