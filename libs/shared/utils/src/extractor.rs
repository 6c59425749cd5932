use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::auth::Actor;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Middleware for authentication. Validates the bearer token and makes the
/// resulting Actor available to handlers through request extensions.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get("Authorization")
        .ok_or_else(|| AppError::Auth("Missing authorization header".to_string()))?;

    let auth_value = auth_header
        .to_str()
        .map_err(|_| AppError::Auth("Invalid authorization header format".to_string()))?;

    if !auth_value.starts_with("Bearer ") {
        return Err(AppError::Auth("Invalid authorization header format".to_string()));
    }

    let token = &auth_value[7..];

    let actor = validate_token(token, &config.jwt_secret).map_err(AppError::Auth)?;

    request.extensions_mut().insert(actor);

    Ok(next.run(request).await)
}

pub fn extract_actor<B>(request: &Request<B>) -> Result<Actor, AppError> {
    request
        .extensions()
        .get::<Actor>()
        .cloned()
        .ok_or_else(|| AppError::Auth("Actor not found in request extensions".to_string()))
}
