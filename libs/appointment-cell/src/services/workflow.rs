// libs/appointment-cell/src/services/workflow.rs
use std::sync::Arc;

use tracing::{debug, info, warn};
use uuid::Uuid;

use shared_models::auth::Actor;

use crate::models::{
    Appointment, AppointmentStatus, SchedulingError, StatusEvent, StatusUpdateRequest,
};
use crate::repository::AppointmentRepository;
use crate::AppointmentState;

/// Capability predicate consulted before a transition. The engine itself only
/// encodes the state graph and payload rules; who may invoke what is an
/// identity concern answered here.
#[cfg_attr(test, mockall::automock)]
pub trait TransitionAuthorizer: Send + Sync {
    fn may_transition(&self, actor: &Actor, appointment: &Appointment, event: StatusEvent)
        -> bool;
}

/// Default policy: confirm and finalize belong to the owning professional,
/// cancel to either side of the booking.
pub struct RoleAuthorizer;

impl TransitionAuthorizer for RoleAuthorizer {
    fn may_transition(
        &self,
        actor: &Actor,
        appointment: &Appointment,
        event: StatusEvent,
    ) -> bool {
        let is_owning_professional =
            actor.is_professional() && actor.id == appointment.professional_id;
        let is_booking_student = actor.is_student() && actor.id == appointment.student_id;

        match event {
            StatusEvent::Confirm | StatusEvent::Finalize => is_owning_professional,
            StatusEvent::Cancel => is_owning_professional || is_booking_student,
        }
    }
}

pub struct StatusWorkflowService {
    repo: Arc<dyn AppointmentRepository>,
    authorizer: Arc<dyn TransitionAuthorizer>,
}

impl StatusWorkflowService {
    pub fn new(state: &AppointmentState) -> Self {
        Self::with_parts(Arc::clone(&state.repo), Arc::new(RoleAuthorizer))
    }

    pub fn with_parts(
        repo: Arc<dyn AppointmentRepository>,
        authorizer: Arc<dyn TransitionAuthorizer>,
    ) -> Self {
        Self { repo, authorizer }
    }

    /// All statuses legally reachable from `status` in one event.
    pub fn valid_transitions(status: AppointmentStatus) -> &'static [AppointmentStatus] {
        match status {
            AppointmentStatus::Pending => {
                &[AppointmentStatus::Confirmed, AppointmentStatus::Cancelled]
            }
            AppointmentStatus::Confirmed => {
                &[AppointmentStatus::Finalized, AppointmentStatus::Cancelled]
            }
            // Terminal states
            AppointmentStatus::Finalized | AppointmentStatus::Cancelled => &[],
        }
    }

    /// Apply a lifecycle event to an appointment.
    ///
    /// The transition starts from a freshly read state and is written back
    /// with an optimistic status check, so a concurrent transition on the
    /// same appointment makes the stale one fail with `InvalidTransition`
    /// instead of silently overwriting it.
    pub async fn apply(
        &self,
        appointment_id: Uuid,
        request: StatusUpdateRequest,
        actor: &Actor,
    ) -> Result<Appointment, SchedulingError> {
        let current = self.repo.get(appointment_id).await?;

        debug!(
            "Applying {} to appointment {} in status {}",
            request.event, appointment_id, current.status
        );

        if !self
            .authorizer
            .may_transition(actor, &current, request.event)
        {
            warn!(
                "Actor {} not permitted to {} appointment {}",
                actor.id, request.event, appointment_id
            );
            return Err(SchedulingError::Unauthorized);
        }

        let target = match (current.status, request.event) {
            (AppointmentStatus::Pending, StatusEvent::Confirm) => AppointmentStatus::Confirmed,
            (AppointmentStatus::Pending, StatusEvent::Cancel)
            | (AppointmentStatus::Confirmed, StatusEvent::Cancel) => AppointmentStatus::Cancelled,
            (AppointmentStatus::Confirmed, StatusEvent::Finalize) => AppointmentStatus::Finalized,
            _ => {
                warn!(
                    "Invalid transition attempted on appointment {}: {} from {}",
                    appointment_id, request.event, current.status
                );
                return Err(SchedulingError::InvalidTransition(current.status));
            }
        };

        let mut updated = current.clone();
        updated.status = target;

        // Finalize is the only event carrying a mandatory payload: the
        // session enters permanent clinical history here, so it must not
        // close without documentation.
        if request.event == StatusEvent::Finalize {
            let clinical_note = request
                .clinical_note
                .as_deref()
                .map(str::trim)
                .filter(|note| !note.is_empty())
                .ok_or_else(|| {
                    SchedulingError::ValidationError(
                        "A non-empty clinical note is required to finalize".to_string(),
                    )
                })?;
            let attended = request.attended.ok_or_else(|| {
                SchedulingError::ValidationError(
                    "Attendance must be recorded to finalize".to_string(),
                )
            })?;

            updated.attended = Some(attended);
            updated.clinical_note = Some(clinical_note.to_string());
        }

        let updated = self.repo.update_if_status(updated, current.status).await?;

        info!(
            "Appointment {} transitioned {} -> {}",
            appointment_id, current.status, updated.status
        );
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use professional_cell::models::{SessionMode, SlotTime};

    use super::*;
    use crate::repository::InMemoryAppointmentRepository;

    fn pending_appointment(student_id: Uuid, professional_id: Uuid) -> Appointment {
        Appointment {
            id: Uuid::new_v4(),
            student_id,
            professional_id,
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            time: SlotTime::new(9, 0).unwrap(),
            mode: SessionMode::Online,
            note: None,
            status: AppointmentStatus::Pending,
            attended: None,
            clinical_note: None,
            evaluation_access_granted: true,
            created_at: Utc::now(),
        }
    }

    fn professional_actor(id: Uuid) -> Actor {
        Actor {
            id,
            role: shared_models::auth::ActorRole::Professional,
        }
    }

    #[tokio::test]
    async fn denied_capability_rejects_before_state_check() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let appointment = pending_appointment(Uuid::new_v4(), Uuid::new_v4());
        repo.insert_if_slot_free(appointment.clone()).await.unwrap();

        let mut authorizer = MockTransitionAuthorizer::new();
        authorizer.expect_may_transition().return_const(false);

        let service = StatusWorkflowService::with_parts(repo, Arc::new(authorizer));
        let result = service
            .apply(
                appointment.id,
                StatusUpdateRequest {
                    event: StatusEvent::Confirm,
                    attended: None,
                    clinical_note: None,
                },
                &professional_actor(appointment.professional_id),
            )
            .await;

        assert_eq!(result, Err(SchedulingError::Unauthorized));
    }

    #[tokio::test]
    async fn granted_capability_still_enforces_state_graph() {
        let repo = Arc::new(InMemoryAppointmentRepository::new());
        let appointment = pending_appointment(Uuid::new_v4(), Uuid::new_v4());
        repo.insert_if_slot_free(appointment.clone()).await.unwrap();

        let mut authorizer = MockTransitionAuthorizer::new();
        authorizer.expect_may_transition().return_const(true);

        let service = StatusWorkflowService::with_parts(repo, Arc::new(authorizer));
        let result = service
            .apply(
                appointment.id,
                StatusUpdateRequest {
                    event: StatusEvent::Finalize,
                    attended: Some(true),
                    clinical_note: Some("note".to_string()),
                },
                &professional_actor(appointment.professional_id),
            )
            .await;

        // Finalize is not legal from Pending even for a permitted actor.
        assert_eq!(
            result,
            Err(SchedulingError::InvalidTransition(
                AppointmentStatus::Pending
            ))
        );
    }

    #[test]
    fn terminal_states_have_no_transitions() {
        assert!(StatusWorkflowService::valid_transitions(AppointmentStatus::Finalized).is_empty());
        assert!(StatusWorkflowService::valid_transitions(AppointmentStatus::Cancelled).is_empty());
    }
}
