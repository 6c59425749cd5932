// libs/professional-cell/src/handlers.rs
use axum::{
    extract::{Extension, State},
    Json,
};
use serde_json::{json, Value};

use shared_models::auth::Actor;
use shared_models::error::AppError;

use crate::ProfessionalState;

/// List every professional together with their availability template.
#[axum::debug_handler]
pub async fn list_professionals(
    State(state): State<ProfessionalState>,
    Extension(_actor): Extension<Actor>,
) -> Result<Json<Value>, AppError> {
    let professionals = state
        .directory
        .list()
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!(professionals)))
}
