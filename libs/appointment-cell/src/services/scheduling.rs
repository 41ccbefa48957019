use std::sync::Arc;

use tracing::{debug, info, warn};

use doctor_cell::{DoctorRepository, DOCTOR_NOT_FOUND};
use patient_cell::{PatientRepository, PATIENT_NOT_FOUND};
use shared_models::AppError;

use crate::models::{Appointment, NewAppointment, ScheduleAppointmentRequest};
use crate::repository::AppointmentRepository;

/// Books appointments against doctor and patient records it does not own.
pub struct SchedulingService {
    appointments: Arc<dyn AppointmentRepository>,
    doctors: Arc<dyn DoctorRepository>,
    patients: Arc<dyn PatientRepository>,
}

impl SchedulingService {
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        doctors: Arc<dyn DoctorRepository>,
        patients: Arc<dyn PatientRepository>,
    ) -> Self {
        Self {
            appointments,
            doctors,
            patients,
        }
    }

    /// Resolves the patient, then the doctor, then inserts the appointment.
    /// Neither the doctor's active flag nor overlapping bookings are checked.
    /// A returned appointment has been committed.
    pub async fn schedule(&self, request: ScheduleAppointmentRequest) -> Result<Appointment, AppError> {
        debug!(
            "Scheduling appointment: patient {} doctor {} at {}",
            request.patient_id, request.doctor_id, request.scheduled_at
        );

        let patient = self
            .patients
            .find_by_id(request.patient_id)
            .await?
            .ok_or_else(|| {
                warn!("Scheduling rejected: patient {} not found", request.patient_id);
                AppError::NotFound(PATIENT_NOT_FOUND.to_string())
            })?;

        let doctor = self
            .doctors
            .find_by_id(request.doctor_id)
            .await?
            .ok_or_else(|| {
                warn!("Scheduling rejected: doctor {} not found", request.doctor_id);
                AppError::NotFound(DOCTOR_NOT_FOUND.to_string())
            })?;

        let appointment = self
            .appointments
            .insert(NewAppointment {
                doctor_id: doctor.id,
                patient_id: patient.id,
                scheduled_at: request.scheduled_at,
            })
            .await?;

        info!(
            "Appointment {} scheduled for patient {} with doctor {} at {}",
            appointment.id, appointment.patient_id, appointment.doctor_id, appointment.scheduled_at
        );
        Ok(appointment)
    }
}
