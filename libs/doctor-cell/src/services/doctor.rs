use std::sync::Arc;

use tracing::{debug, error, info, warn};

use shared_database::DatabaseError;
use shared_models::{AppError, Page, PageRequest};

use crate::models::{
    Doctor, NewDoctor, RegisterDoctorRequest, UpdateDoctorRequest,
    DOCTOR_NOT_FOUND, DUPLICATE_CRM_MESSAGE, DUPLICATE_EMAIL_MESSAGE,
};
use crate::repository::DoctorRepository;

pub struct DoctorService {
    repository: Arc<dyn DoctorRepository>,
}

impl DoctorService {
    pub fn new(repository: Arc<dyn DoctorRepository>) -> Self {
        Self { repository }
    }

    /// Register a new doctor.
    ///
    /// The CRM is checked before the email, so a request colliding on both
    /// reports `DuplicateProfessionalId`. Nothing is written when either check
    /// fails.
    pub async fn register(&self, request: RegisterDoctorRequest) -> Result<Doctor, AppError> {
        request.validate()?;
        debug!("Registering doctor with CRM {}", request.crm);

        if self.repository.exists_by_crm(&request.crm).await? {
            warn!("Rejected registration: CRM {} already in use", request.crm);
            return Err(AppError::DuplicateProfessionalId(DUPLICATE_CRM_MESSAGE.to_string()));
        }

        if self.repository.exists_by_email(&request.email).await? {
            warn!("Rejected registration: email {} already in use", request.email);
            return Err(AppError::DuplicateEmail(DUPLICATE_EMAIL_MESSAGE.to_string()));
        }

        let doctor = self
            .repository
            .insert(NewDoctor::from(request))
            .await
            .map_err(map_unique_violation)?;

        info!("Doctor {} registered (CRM {})", doctor.id, doctor.crm);
        Ok(doctor)
    }

    /// Apply a partial update; absent fields keep their current values.
    pub async fn update(&self, request: UpdateDoctorRequest) -> Result<Doctor, AppError> {
        request.validate()?;

        let mut doctor = self.load(request.id).await?;
        doctor.apply_update(request);

        let doctor = self
            .repository
            .update_profile(&doctor)
            .await
            .map_err(not_found_on_missing)?;

        info!("Doctor {} updated", doctor.id);
        Ok(doctor)
    }

    /// Mark the doctor inactive. The record stays addressable by id.
    /// Repeating the call on an inactive doctor succeeds without change.
    pub async fn soft_delete(&self, id: i64) -> Result<(), AppError> {
        let doctor = self.load(id).await?;

        if !doctor.active {
            debug!("Doctor {} already inactive", id);
            return Ok(());
        }

        self.repository.deactivate(id).await.map_err(not_found_on_missing)?;

        info!("Doctor {} deactivated", id);
        Ok(())
    }

    /// Full detail regardless of the active flag.
    pub async fn get_by_id(&self, id: i64) -> Result<Doctor, AppError> {
        self.load(id).await
    }

    pub async fn list_active(&self, page: PageRequest) -> Result<Page<Doctor>, AppError> {
        debug!(
            "Listing active doctors: page {} size {} sort {} {}",
            page.page,
            page.size,
            page.sort.property,
            page.sort.direction.as_str()
        );

        Ok(self.repository.find_all_active(&page).await?)
    }

    /// Every lookup failure, not only absence, surfaces as `NotFound`.
    async fn load(&self, id: i64) -> Result<Doctor, AppError> {
        match self.repository.find_by_id(id).await {
            Ok(Some(doctor)) => Ok(doctor),
            Ok(None) => Err(AppError::NotFound(DOCTOR_NOT_FOUND.to_string())),
            Err(err) => {
                error!("Lookup of doctor {} failed: {}", id, err);
                Err(AppError::NotFound(DOCTOR_NOT_FOUND.to_string()))
            }
        }
    }
}

/// A unique index rejecting the insert means another registration won the race
/// after the fast-path checks passed.
fn map_unique_violation(err: DatabaseError) -> AppError {
    if err.is_unique_violation_on("crm") {
        AppError::DuplicateProfessionalId(DUPLICATE_CRM_MESSAGE.to_string())
    } else if matches!(err, DatabaseError::UniqueViolation { .. }) {
        AppError::DuplicateEmail(DUPLICATE_EMAIL_MESSAGE.to_string())
    } else {
        err.into()
    }
}

fn not_found_on_missing(err: DatabaseError) -> AppError {
    match err {
        DatabaseError::NotFound(_) => AppError::NotFound(DOCTOR_NOT_FOUND.to_string()),
        other => other.into(),
    }
}
