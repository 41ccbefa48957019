use std::sync::Arc;

use axum::{
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
    body::Body,
};

use shared_models::error::AppError;
use shared_config::AppConfig;

use crate::jwt::validate_token;

/// Rejects requests without a valid bearer token and stores the caller in
/// the request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_value = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::InvalidCredentials("Missing authorization header".to_string()))?
        .to_str()
        .map_err(|_| AppError::InvalidCredentials("Invalid authorization header format".to_string()))?;

    let token = auth_value
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::InvalidCredentials("Invalid authorization header format".to_string()))?;

    let user = validate_token(token, &config.supabase_jwt_secret)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
