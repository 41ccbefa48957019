use async_trait::async_trait;

use shared_database::DatabaseError;

use crate::models::{NewPatient, Patient};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryPatientRepository;
pub use supabase::SupabasePatientRepository;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, DatabaseError>;

    async fn insert(&self, patient: NewPatient) -> Result<Patient, DatabaseError>;
}
