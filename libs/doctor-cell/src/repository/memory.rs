use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use shared_database::DatabaseError;
use shared_models::{Page, PageRequest, SortDirection};

use crate::models::{Doctor, NewDoctor};
use super::{DoctorRepository, RepositoryResult};

#[derive(Default)]
struct State {
    last_id: i64,
    doctors: BTreeMap<i64, Doctor>,
}

/// Doctor store held in process memory.
///
/// Uniqueness is re-checked under the write lock on insert, so the check and
/// the insert form one unit the way a unique index would.
#[derive(Clone, Default)]
pub struct InMemoryDoctorRepository {
    state: Arc<RwLock<State>>,
}

impl InMemoryDoctorRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.doctors.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn compare_by(property: &str, a: &Doctor, b: &Doctor) -> Ordering {
    match property {
        "email" => a.email.cmp(&b.email),
        "crm" => a.crm.cmp(&b.crm),
        "specialty" => a.specialty.as_str().cmp(b.specialty.as_str()),
        "id" => a.id.cmp(&b.id),
        _ => a.name.cmp(&b.name),
    }
}

#[async_trait]
impl DoctorRepository for InMemoryDoctorRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Doctor>> {
        Ok(self.state.read().await.doctors.get(&id).cloned())
    }

    async fn exists_by_crm(&self, crm: &str) -> RepositoryResult<bool> {
        Ok(self.state.read().await.doctors.values().any(|d| d.crm == crm))
    }

    async fn exists_by_email(&self, email: &str) -> RepositoryResult<bool> {
        Ok(self.state.read().await.doctors.values().any(|d| d.email == email))
    }

    async fn find_all_active(&self, page: &PageRequest) -> RepositoryResult<Page<Doctor>> {
        let state = self.state.read().await;

        let mut active: Vec<Doctor> = state.doctors.values().filter(|d| d.active).cloned().collect();
        active.sort_by(|a, b| {
            let ordering = compare_by(&page.sort.property, a, b).then(a.id.cmp(&b.id));
            match page.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });

        let total = active.len() as u64;
        let content = active
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.size as usize)
            .collect();

        Ok(Page::new(content, page, total))
    }

    async fn insert(&self, doctor: NewDoctor) -> RepositoryResult<Doctor> {
        let mut state = self.state.write().await;

        if state.doctors.values().any(|d| d.crm == doctor.crm) {
            return Err(DatabaseError::UniqueViolation {
                detail: format!(
                    "duplicate key value violates unique constraint \"doctors_crm_key\" Key (crm)=({}) already exists.",
                    doctor.crm
                ),
            });
        }
        if state.doctors.values().any(|d| d.email == doctor.email) {
            return Err(DatabaseError::UniqueViolation {
                detail: format!(
                    "duplicate key value violates unique constraint \"doctors_email_key\" Key (email)=({}) already exists.",
                    doctor.email
                ),
            });
        }

        state.last_id += 1;
        let doctor = doctor.with_id(state.last_id);
        state.doctors.insert(doctor.id, doctor.clone());

        Ok(doctor)
    }

    async fn update_profile(&self, doctor: &Doctor) -> RepositoryResult<Doctor> {
        let mut state = self.state.write().await;

        let stored = state
            .doctors
            .get_mut(&doctor.id)
            .ok_or_else(|| DatabaseError::NotFound(format!("doctor {}", doctor.id)))?;
        stored.name = doctor.name.clone();
        stored.phone = doctor.phone.clone();
        stored.address = doctor.address.clone();

        Ok(stored.clone())
    }

    async fn deactivate(&self, id: i64) -> RepositoryResult<()> {
        let mut state = self.state.write().await;

        let stored = state
            .doctors
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::NotFound(format!("doctor {}", id)))?;
        stored.active = false;

        Ok(())
    }
}
