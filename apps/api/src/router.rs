use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use appointment_cell::{router::appointment_routes, SchedulingService, SupabaseAppointmentRepository};
use doctor_cell::{router::doctor_routes, DoctorRepository, DoctorService, SupabaseDoctorRepository};
use patient_cell::SupabasePatientRepository;
use shared_config::AppConfig;

/// Wires the Supabase-backed repositories into the services and mounts each cell.
pub fn create_router(config: Arc<AppConfig>) -> Router {
    let doctors: Arc<dyn DoctorRepository> = Arc::new(SupabaseDoctorRepository::new(&config));
    let patients = Arc::new(SupabasePatientRepository::new(&config));
    let appointments = Arc::new(SupabaseAppointmentRepository::new(&config));

    let doctor_service = Arc::new(DoctorService::new(doctors.clone()));
    let scheduling_service = Arc::new(SchedulingService::new(appointments, doctors, patients));

    Router::new()
        .route("/", get(|| async { "Voll Clinic API is running!" }))
        .nest("/doctors", doctor_routes(config.clone(), doctor_service))
        .nest("/appointments", appointment_routes(config, scheduling_service))
}
