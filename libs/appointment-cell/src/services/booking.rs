// libs/appointment-cell/src/services/booking.rs
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use professional_cell::directory::ProfessionalDirectory;
use professional_cell::services::availability;
use shared_models::auth::Actor;

use crate::models::{
    Appointment, AppointmentStatus, BookAppointmentRequest, SchedulingError,
};
use crate::repository::AppointmentRepository;
use crate::services::notify::BookingNotifier;
use crate::AppointmentState;

pub struct BookingService {
    repo: Arc<dyn AppointmentRepository>,
    directory: Arc<dyn ProfessionalDirectory>,
    notifier: Arc<dyn BookingNotifier>,
}

impl BookingService {
    pub fn new(state: &AppointmentState) -> Self {
        Self::with_parts(
            Arc::clone(&state.repo),
            Arc::clone(&state.directory),
            Arc::clone(&state.notifier),
        )
    }

    pub fn with_parts(
        repo: Arc<dyn AppointmentRepository>,
        directory: Arc<dyn ProfessionalDirectory>,
        notifier: Arc<dyn BookingNotifier>,
    ) -> Self {
        Self {
            repo,
            directory,
            notifier,
        }
    }

    /// Validate and create a booking in status Pending.
    ///
    /// Validation order: professional exists, date not in the past, mode
    /// accepted, slot resolvable. The final "slot still free" check happens
    /// inside the repository insert, so two racing requests for the same
    /// slot cannot both succeed; the loser gets `SlotUnavailable`. There are
    /// no partial side effects on failure.
    pub async fn create(
        &self,
        request: BookAppointmentRequest,
        student_id: Uuid,
        today: NaiveDate,
    ) -> Result<Appointment, SchedulingError> {
        info!(
            "Booking appointment for student {} with professional {}",
            student_id, request.professional_id
        );

        let professional = self
            .directory
            .get(request.professional_id)
            .await
            .map_err(|e| SchedulingError::Storage(e.to_string()))?
            .ok_or(SchedulingError::ProfessionalNotFound)?;

        if request.date < today {
            return Err(SchedulingError::InvalidDate);
        }

        if !professional.accepts_mode(request.mode) {
            warn!(
                "Professional {} does not accept mode {}",
                professional.id, request.mode
            );
            return Err(SchedulingError::InvalidMode);
        }

        let taken = self
            .repo
            .taken_slots(professional.id, request.date)
            .await?;
        let open_slots = availability::resolve(&professional, request.date, today, &taken);

        if !open_slots.contains(&request.time) {
            debug!(
                "Slot {} not open for professional {} on {}",
                request.time, professional.id, request.date
            );
            return Err(SchedulingError::SlotUnavailable);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            student_id,
            professional_id: professional.id,
            date: request.date,
            time: request.time,
            mode: request.mode,
            note: request.note,
            status: AppointmentStatus::Pending,
            attended: None,
            clinical_note: None,
            evaluation_access_granted: request.evaluation_access_granted,
            created_at: Utc::now(),
        };

        let appointment = self.repo.insert_if_slot_free(appointment).await?;

        self.notifier.booking_created(appointment.id).await;

        info!(
            "Appointment {} booked with professional {} for {} {}",
            appointment.id, appointment.professional_id, appointment.date, appointment.time
        );
        Ok(appointment)
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, SchedulingError> {
        self.repo.get(appointment_id).await
    }

    /// Appointments where the actor is the booking student or the owning
    /// professional, ordered by date and time.
    pub async fn list_for_actor(
        &self,
        actor: &Actor,
    ) -> Result<Vec<Appointment>, SchedulingError> {
        self.repo.list_for_actor(actor).await
    }
}
