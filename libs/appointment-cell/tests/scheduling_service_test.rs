use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};

use appointment_cell::{InMemoryAppointmentRepository, ScheduleAppointmentRequest, SchedulingService};
use doctor_cell::{DoctorService, InMemoryDoctorRepository, RegisterDoctorRequest, Specialty};
use patient_cell::{InMemoryPatientRepository, NewPatient, PatientRepository};
use shared_models::{Address, AppError};

struct Fixture {
    scheduling: SchedulingService,
    doctors: DoctorService,
    patients: InMemoryPatientRepository,
    appointments: InMemoryAppointmentRepository,
}

fn address() -> Address {
    Address {
        street: "Rua das Flores".to_string(),
        district: "Bairro Exemplo".to_string(),
        postal_code: "01000000".to_string(),
        city: "São Paulo".to_string(),
        state: "SP".to_string(),
        complement: None,
        number: Some("123".to_string()),
    }
}

fn fixture() -> Fixture {
    let doctor_repository = Arc::new(InMemoryDoctorRepository::new());
    let patients = InMemoryPatientRepository::new();
    let appointments = InMemoryAppointmentRepository::new();

    Fixture {
        scheduling: SchedulingService::new(
            Arc::new(appointments.clone()),
            doctor_repository.clone(),
            Arc::new(patients.clone()),
        ),
        doctors: DoctorService::new(doctor_repository),
        patients,
        appointments,
    }
}

impl Fixture {
    async fn doctor(&self) -> i64 {
        self.doctors
            .register(RegisterDoctorRequest {
                name: "Jose da Silva".to_string(),
                email: "jose.medico@voll.med".to_string(),
                phone: "1199999999".to_string(),
                crm: "53455".to_string(),
                specialty: Specialty::Dermatology,
                address: address(),
            })
            .await
            .unwrap()
            .id
    }

    async fn patient(&self) -> i64 {
        self.patients
            .insert(NewPatient {
                name: "Carlos Pereira".to_string(),
                email: "carlos@voll.med".to_string(),
                phone: "11988887777".to_string(),
                cpf: "12345678900".to_string(),
                address: address(),
            })
            .await
            .unwrap()
            .id
    }
}

fn request(patient_id: i64, doctor_id: i64) -> ScheduleAppointmentRequest {
    ScheduleAppointmentRequest {
        patient_id,
        doctor_id,
        scheduled_at: Utc.with_ymd_and_hms(2026, 11, 3, 14, 30, 0).unwrap(),
    }
}

#[tokio::test]
async fn test_schedule_persists_one_appointment() {
    let fixture = fixture();
    let doctor_id = fixture.doctor().await;
    let patient_id = fixture.patient().await;

    let appointment = fixture.scheduling.schedule(request(patient_id, doctor_id)).await.unwrap();

    assert_eq!(appointment.doctor_id, doctor_id);
    assert_eq!(appointment.patient_id, patient_id);

    let stored = fixture.appointments.all().await;
    assert_eq!(stored, vec![appointment]);
}

#[tokio::test]
async fn test_missing_patient_reported_even_with_valid_doctor() {
    let fixture = fixture();
    let doctor_id = fixture.doctor().await;

    assert_matches!(
        fixture.scheduling.schedule(request(99, doctor_id)).await,
        Err(AppError::NotFound(msg)) if msg == "Patient not found"
    );
    assert!(fixture.appointments.all().await.is_empty());
}

#[tokio::test]
async fn test_missing_doctor_reported_after_patient_resolves() {
    let fixture = fixture();
    let patient_id = fixture.patient().await;

    assert_matches!(
        fixture.scheduling.schedule(request(patient_id, 99)).await,
        Err(AppError::NotFound(msg)) if msg == "Doctor not found"
    );
    assert!(fixture.appointments.all().await.is_empty());
}

#[tokio::test]
async fn test_both_missing_names_the_patient() {
    let fixture = fixture();

    assert_matches!(
        fixture.scheduling.schedule(request(1, 1)).await,
        Err(AppError::NotFound(msg)) if msg == "Patient not found"
    );
}

#[tokio::test]
async fn test_inactive_doctor_can_still_be_booked() {
    let fixture = fixture();
    let doctor_id = fixture.doctor().await;
    let patient_id = fixture.patient().await;
    fixture.doctors.soft_delete(doctor_id).await.unwrap();

    let appointment = fixture.scheduling.schedule(request(patient_id, doctor_id)).await.unwrap();

    assert_eq!(appointment.doctor_id, doctor_id);
}

#[tokio::test]
async fn test_overlapping_bookings_are_not_checked() {
    let fixture = fixture();
    let doctor_id = fixture.doctor().await;
    let patient_id = fixture.patient().await;

    fixture.scheduling.schedule(request(patient_id, doctor_id)).await.unwrap();
    fixture.scheduling.schedule(request(patient_id, doctor_id)).await.unwrap();

    assert_eq!(fixture.appointments.all().await.len(), 2);
}
