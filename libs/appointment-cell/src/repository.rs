// libs/appointment-cell/src/repository.rs
use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use professional_cell::models::SlotTime;
use shared_models::auth::{Actor, ActorRole};

use crate::models::{Appointment, AppointmentStatus, SchedulingError};

/// The only mutable store this core owns. All appointment writes go through
/// here; the implementation must make `insert_if_slot_free` and
/// `update_if_status` atomic with their respective checks.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Insert the appointment unless an active appointment already holds the
    /// same (professional, date, time). The check and the insert happen under
    /// one critical section; the loser of a race gets `SlotUnavailable`.
    async fn insert_if_slot_free(
        &self,
        appointment: Appointment,
    ) -> Result<Appointment, SchedulingError>;

    /// Write `updated` only if the stored status still equals `expected`.
    /// A stale write attempt fails with `InvalidTransition` carrying the
    /// status actually found.
    async fn update_if_status(
        &self,
        updated: Appointment,
        expected: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError>;

    async fn get(&self, id: Uuid) -> Result<Appointment, SchedulingError>;

    async fn list_for_actor(&self, actor: &Actor) -> Result<Vec<Appointment>, SchedulingError>;

    /// Slots held by active appointments for a professional on a date.
    async fn taken_slots(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<BTreeSet<SlotTime>, SchedulingError>;
}

#[derive(Default)]
struct Store {
    appointments: HashMap<Uuid, Appointment>,
    // (professional, date, time) -> appointment id, active appointments only
    active_slots: HashMap<(Uuid, NaiveDate, SlotTime), Uuid>,
}

/// In-memory repository. A single async mutex serializes every write, which
/// is the whole concurrency story: slot allocation and status updates are
/// check-then-write sequences under the same lock.
pub struct InMemoryAppointmentRepository {
    store: Mutex<Store>,
}

impl InMemoryAppointmentRepository {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store::default()),
        }
    }
}

impl Default for InMemoryAppointmentRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn insert_if_slot_free(
        &self,
        appointment: Appointment,
    ) -> Result<Appointment, SchedulingError> {
        let mut store = self.store.lock().await;

        let key = (
            appointment.professional_id,
            appointment.date,
            appointment.time,
        );
        if store.active_slots.contains_key(&key) {
            warn!(
                "Slot {} {} already held for professional {}",
                appointment.date, appointment.time, appointment.professional_id
            );
            return Err(SchedulingError::SlotUnavailable);
        }

        store.active_slots.insert(key, appointment.id);
        store.appointments.insert(appointment.id, appointment.clone());

        debug!("Appointment {} stored", appointment.id);
        Ok(appointment)
    }

    async fn update_if_status(
        &self,
        updated: Appointment,
        expected: AppointmentStatus,
    ) -> Result<Appointment, SchedulingError> {
        let mut store = self.store.lock().await;

        let current = store
            .appointments
            .get(&updated.id)
            .ok_or(SchedulingError::NotFound)?;

        if current.status != expected {
            warn!(
                "Stale update for appointment {}: expected {}, found {}",
                updated.id, expected, current.status
            );
            return Err(SchedulingError::InvalidTransition(current.status));
        }

        // A cancellation releases the slot for re-booking.
        if current.is_active() && !updated.is_active() {
            store
                .active_slots
                .remove(&(updated.professional_id, updated.date, updated.time));
        }

        store.appointments.insert(updated.id, updated.clone());
        Ok(updated)
    }

    async fn get(&self, id: Uuid) -> Result<Appointment, SchedulingError> {
        self.store
            .lock()
            .await
            .appointments
            .get(&id)
            .cloned()
            .ok_or(SchedulingError::NotFound)
    }

    async fn list_for_actor(&self, actor: &Actor) -> Result<Vec<Appointment>, SchedulingError> {
        let store = self.store.lock().await;

        let mut appointments: Vec<Appointment> = store
            .appointments
            .values()
            .filter(|appointment| match actor.role {
                ActorRole::Student => appointment.student_id == actor.id,
                ActorRole::Professional => appointment.professional_id == actor.id,
            })
            .cloned()
            .collect();

        appointments.sort_by(|a, b| (a.date, a.time).cmp(&(b.date, b.time)));
        Ok(appointments)
    }

    async fn taken_slots(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<BTreeSet<SlotTime>, SchedulingError> {
        let store = self.store.lock().await;

        Ok(store
            .active_slots
            .keys()
            .filter(|(professional, slot_date, _)| {
                *professional == professional_id && *slot_date == date
            })
            .map(|(_, _, time)| *time)
            .collect())
    }
}
