use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_database::DatabaseError;

use crate::models::{Appointment, NewAppointment};
use super::AppointmentRepository;

/// Appointments kept in insertion order; ids follow that order starting at 1.
#[derive(Clone, Default)]
pub struct InMemoryAppointmentRepository {
    appointments: Arc<RwLock<Vec<Appointment>>>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Appointment> {
        self.appointments.read().await.clone()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert(&self, appointment: NewAppointment) -> Result<Appointment, DatabaseError> {
        let mut appointments = self.appointments.write().await;

        let appointment = appointment.with_id(appointments.len() as i64 + 1);
        appointments.push(appointment.clone());

        Ok(appointment)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Appointment>, DatabaseError> {
        Ok(self.appointments.read().await.iter().find(|a| a.id == id).cloned())
    }
}
