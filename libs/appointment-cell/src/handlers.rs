use std::sync::Arc;

use axum::{extract::State, Json};

use shared_models::AppError;

use crate::models::{Appointment, ScheduleAppointmentRequest};
use crate::services::SchedulingService;

#[axum::debug_handler]
pub async fn schedule_appointment(
    State(service): State<Arc<SchedulingService>>,
    Json(request): Json<ScheduleAppointmentRequest>,
) -> Result<Json<Appointment>, AppError> {
    let appointment = service.schedule(request).await?;
    Ok(Json(appointment))
}
