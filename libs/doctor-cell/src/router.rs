use std::sync::Arc;

use axum::{
    Router,
    routing::get,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers::{self, DoctorState};
use crate::services::DoctorService;

pub fn doctor_routes(config: Arc<AppConfig>, service: Arc<DoctorService>) -> Router {
    let state = DoctorState {
        service,
        default_page_size: config.default_page_size,
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_doctors)
                .post(handlers::register_doctor)
                .put(handlers::update_doctor),
        )
        .route(
            "/{doctor_id}",
            get(handlers::get_doctor).delete(handlers::delete_doctor),
        )
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(state)
}
