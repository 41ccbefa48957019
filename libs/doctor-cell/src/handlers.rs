use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};

use shared_models::{AppError, Page};

use crate::models::{
    DoctorDetail, DoctorListItem, DoctorListQuery, RegisterDoctorRequest, UpdateDoctorRequest,
};
use crate::services::DoctorService;

#[derive(Clone)]
pub struct DoctorState {
    pub service: Arc<DoctorService>,
    pub default_page_size: u32,
}

#[axum::debug_handler]
pub async fn register_doctor(
    State(state): State<DoctorState>,
    Json(request): Json<RegisterDoctorRequest>,
) -> Result<impl IntoResponse, AppError> {
    let doctor = state.service.register(request).await?;
    let location = format!("/doctors/{}", doctor.id);

    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(DoctorDetail::from(doctor)),
    ))
}

#[axum::debug_handler]
pub async fn list_doctors(
    State(state): State<DoctorState>,
    Query(query): Query<DoctorListQuery>,
) -> Result<Json<Page<DoctorListItem>>, AppError> {
    let page = query.into_page_request(state.default_page_size);
    let doctors = state.service.list_active(page).await?;

    Ok(Json(doctors.map(DoctorListItem::from)))
}

#[axum::debug_handler]
pub async fn update_doctor(
    State(state): State<DoctorState>,
    Json(request): Json<UpdateDoctorRequest>,
) -> Result<Json<DoctorDetail>, AppError> {
    let doctor = state.service.update(request).await?;
    Ok(Json(doctor.into()))
}

#[axum::debug_handler]
pub async fn delete_doctor(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    state.service.soft_delete(doctor_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn get_doctor(
    State(state): State<DoctorState>,
    Path(doctor_id): Path<i64>,
) -> Result<Json<DoctorDetail>, AppError> {
    let doctor = state.service.get_by_id(doctor_id).await?;
    Ok(Json(doctor.into()))
}
