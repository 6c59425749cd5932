// libs/appointment-cell/src/models.rs
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use professional_cell::models::{SessionMode, SlotTime};

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booked session between a student and a professional. Never deleted,
/// only transitioned; history stays around for audit and for evaluation
/// access checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub student_id: Uuid,
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub mode: SessionMode,
    pub note: Option<String>,
    pub status: AppointmentStatus,
    pub attended: Option<bool>,
    pub clinical_note: Option<String>,
    /// Student opt-in letting the professional read their self-assessment
    /// history for this session. Fixed at creation, never mutated.
    pub evaluation_access_granted: bool,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    /// Active appointments hold their slot; cancelled ones release it.
    pub fn is_active(&self) -> bool {
        self.status != AppointmentStatus::Cancelled
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Finalized,
    Cancelled,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Finalized | AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Finalized => write!(f, "finalized"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Lifecycle events an actor can apply to an appointment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StatusEvent {
    Confirm,
    Cancel,
    Finalize,
}

impl fmt::Display for StatusEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusEvent::Confirm => write!(f, "confirm"),
            StatusEvent::Cancel => write!(f, "cancel"),
            StatusEvent::Finalize => write!(f, "finalize"),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub professional_id: Uuid,
    pub date: NaiveDate,
    pub time: SlotTime,
    pub mode: SessionMode,
    pub note: Option<String>,
    pub evaluation_access_granted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub event: StatusEvent,
    pub attended: Option<bool>,
    pub clinical_note: Option<String>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchedulingError {
    #[error("Professional not found")]
    ProfessionalNotFound,

    #[error("Appointment not found")]
    NotFound,

    #[error("Appointment date is in the past")]
    InvalidDate,

    #[error("Professional does not offer this session mode")]
    InvalidMode,

    #[error("Appointment slot not available")]
    SlotUnavailable,

    #[error("Transition not allowed from status: {0}")]
    InvalidTransition(AppointmentStatus),

    #[error("Actor not permitted to perform this transition")]
    Unauthorized,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Evaluation access not granted for this appointment")]
    AccessDenied,

    #[error("Storage error: {0}")]
    Storage(String),
}
