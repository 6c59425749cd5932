// libs/appointment-cell/src/handlers.rs
use axum::{
    extract::{Extension, Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::auth::Actor;
use shared_models::error::AppError;

use crate::models::{BookAppointmentRequest, SchedulingError, StatusUpdateRequest};
use crate::services::access::EvaluationAccessService;
use crate::services::booking::BookingService;
use crate::services::workflow::StatusWorkflowService;
use crate::AppointmentState;

fn map_scheduling_error(error: SchedulingError) -> AppError {
    match error {
        SchedulingError::ProfessionalNotFound => {
            AppError::NotFound("Professional not found".to_string())
        }
        SchedulingError::NotFound => AppError::NotFound("Appointment not found".to_string()),
        SchedulingError::InvalidDate => {
            AppError::ValidationError("Appointment date is in the past".to_string())
        }
        SchedulingError::InvalidMode => AppError::ValidationError(
            "Professional does not offer this session mode".to_string(),
        ),
        SchedulingError::SlotUnavailable => {
            AppError::Conflict("Appointment slot not available".to_string())
        }
        SchedulingError::InvalidTransition(status) => {
            AppError::Conflict(format!("Transition not allowed from status: {}", status))
        }
        SchedulingError::Unauthorized => AppError::Forbidden(
            "Actor not permitted to perform this transition".to_string(),
        ),
        SchedulingError::ValidationError(msg) => AppError::ValidationError(msg),
        SchedulingError::AccessDenied => AppError::Forbidden(
            "Evaluation access not granted for this appointment".to_string(),
        ),
        SchedulingError::Storage(msg) => AppError::Internal(msg),
    }
}

/// Book a new appointment. The student identity comes from the validated
/// token, never from the request body.
#[axum::debug_handler]
pub async fn book_appointment(
    State(state): State<AppointmentState>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    if !actor.is_student() {
        return Err(AppError::Forbidden(
            "Only students may book appointments".to_string(),
        ));
    }

    let booking_service = BookingService::new(&state);
    let today = Utc::now().date_naive();

    let appointment = booking_service
        .create(request, actor.id, today)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!({
        "success": true,
        "appointment": appointment,
        "message": "Appointment booked successfully"
    })))
}

/// Appointments the calling identity is part of, as student or professional.
#[axum::debug_handler]
pub async fn get_my_appointments(
    State(state): State<AppointmentState>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointments = booking_service
        .list_for_actor(&actor)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointments)))
}

#[axum::debug_handler]
pub async fn update_appointment_status(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Extension(actor): Extension<Actor>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<Value>, AppError> {
    let workflow_service = StatusWorkflowService::new(&state);

    let appointment = workflow_service
        .apply(appointment_id, request, &actor)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(appointment)))
}

/// Self-assessment records shared with the owning professional through this
/// appointment's grant.
#[axum::debug_handler]
pub async fn get_shared_evaluations(
    State(state): State<AppointmentState>,
    Path(appointment_id): Path<Uuid>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<Value>, AppError> {
    let booking_service = BookingService::new(&state);

    let appointment = booking_service
        .get(appointment_id)
        .await
        .map_err(map_scheduling_error)?;

    // Only the owning professional consults shared evaluations; the grant
    // exists to gate exactly this read.
    let is_owning_professional =
        actor.is_professional() && actor.id == appointment.professional_id;
    if !is_owning_professional {
        return Err(AppError::Forbidden(
            "Not authorized to view evaluations for this appointment".to_string(),
        ));
    }

    let access_service = EvaluationAccessService::new(&state);

    let evaluations = access_service
        .fetch_shared_evaluations(&appointment)
        .await
        .map_err(map_scheduling_error)?;

    Ok(Json(json!(evaluations)))
}
