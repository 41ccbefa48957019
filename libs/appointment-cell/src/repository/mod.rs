use async_trait::async_trait;

use shared_database::DatabaseError;

use crate::models::{Appointment, NewAppointment};

pub mod memory;
pub mod supabase;

pub use memory::InMemoryAppointmentRepository;
pub use supabase::SupabaseAppointmentRepository;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, DatabaseError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, DatabaseError>;
}
