use std::sync::Arc;

use axum::{
    Router,
    routing::post,
    middleware,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;
use crate::services::SchedulingService;

pub fn appointment_routes(config: Arc<AppConfig>, service: Arc<SchedulingService>) -> Router {
    Router::new()
        .route("/", post(handlers::schedule_appointment))
        .layer(middleware::from_fn_with_state(config, auth_middleware))
        .with_state(service)
}
