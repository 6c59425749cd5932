// libs/appointment-cell/src/services/access.rs
use std::sync::Arc;

use tracing::{debug, warn};

use evaluation_cell::models::Evaluation;
use evaluation_cell::store::EvaluationStore;

use crate::models::{Appointment, SchedulingError};
use crate::AppointmentState;

/// Whether the professional may read the student's self-assessment history
/// for this session. The grant is captured once at booking time and never
/// revoked; a change of heart means a new appointment, keeping the audit
/// trail unambiguous.
pub fn can_access_evaluations(appointment: &Appointment) -> bool {
    appointment.evaluation_access_granted
}

pub struct EvaluationAccessService {
    evaluations: Arc<dyn EvaluationStore>,
}

impl EvaluationAccessService {
    pub fn new(state: &AppointmentState) -> Self {
        Self::with_store(Arc::clone(&state.evaluations))
    }

    pub fn with_store(evaluations: Arc<dyn EvaluationStore>) -> Self {
        Self { evaluations }
    }

    /// Evaluations shared through this appointment's grant.
    ///
    /// Returns `AccessDenied` when the grant is false so callers can tell
    /// "not permitted to see data" apart from "no shared data".
    pub async fn fetch_shared_evaluations(
        &self,
        appointment: &Appointment,
    ) -> Result<Vec<Evaluation>, SchedulingError> {
        if !can_access_evaluations(appointment) {
            warn!(
                "Evaluation access denied for appointment {}: no grant",
                appointment.id
            );
            return Err(SchedulingError::AccessDenied);
        }

        let evaluations = self
            .evaluations
            .list_for_student(appointment.student_id)
            .await
            .map_err(|e| SchedulingError::Storage(e.to_string()))?;

        debug!(
            "Returning {} shared evaluations for appointment {}",
            evaluations.len(),
            appointment.id
        );
        Ok(evaluations)
    }
}
