use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_database::DatabaseError;

use crate::models::{NewPatient, Patient};
use super::PatientRepository;

#[derive(Default)]
struct State {
    last_id: i64,
    patients: BTreeMap<i64, Patient>,
}

#[derive(Clone, Default)]
pub struct InMemoryPatientRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryPatientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PatientRepository for InMemoryPatientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, DatabaseError> {
        Ok(self.state.read().await.patients.get(&id).cloned())
    }

    async fn insert(&self, patient: NewPatient) -> Result<Patient, DatabaseError> {
        let mut state = self.state.write().await;

        if state.patients.values().any(|p| p.cpf == patient.cpf) {
            return Err(DatabaseError::UniqueViolation {
                detail: format!("Key (cpf)=({}) already exists.", patient.cpf),
            });
        }

        state.last_id += 1;
        let patient = patient.with_id(state.last_id);
        state.patients.insert(patient.id, patient.clone());

        Ok(patient)
    }
}
