// libs/appointment-cell/tests/booking_test.rs
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::NaiveDate;
use uuid::Uuid;

use appointment_cell::models::{
    AppointmentStatus, BookAppointmentRequest, SchedulingError,
};
use appointment_cell::repository::{AppointmentRepository, InMemoryAppointmentRepository};
use appointment_cell::services::booking::BookingService;
use appointment_cell::services::notify::{BookingEvent, ChannelNotifier};
use professional_cell::directory::{InMemoryProfessionalDirectory, ProfessionalDirectory};
use professional_cell::models::{DayOfWeek, Professional, SessionMode, SlotTime};
use professional_cell::services::availability;
use tokio::sync::mpsc;

fn slot(hour: u32, minute: u32) -> SlotTime {
    SlotTime::new(hour, minute).unwrap()
}

/// 2025-03-10 is a Monday.
fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn dr_x(modes: Vec<SessionMode>) -> Professional {
    let mut dates = BTreeMap::new();
    dates.insert(
        monday(),
        [slot(9, 0), slot(10, 0)].into_iter().collect::<BTreeSet<_>>(),
    );
    let mut availability = professional_cell::models::WeeklyAvailability::new();
    availability.insert(DayOfWeek::Monday, dates);

    Professional {
        id: Uuid::new_v4(),
        display_name: "Dr. X".to_string(),
        specialties: vec!["exam stress".to_string()],
        modes,
        availability,
    }
}

struct Fixture {
    repo: Arc<InMemoryAppointmentRepository>,
    directory: Arc<InMemoryProfessionalDirectory>,
    service: BookingService,
    events: mpsc::UnboundedReceiver<BookingEvent>,
}

async fn fixture(professional: &Professional) -> Fixture {
    let repo = Arc::new(InMemoryAppointmentRepository::new());
    let directory = Arc::new(InMemoryProfessionalDirectory::new());
    directory.upsert(professional.clone()).await;

    let (notifier, events) = ChannelNotifier::new();
    let service = BookingService::with_parts(
        repo.clone(),
        directory.clone(),
        Arc::new(notifier),
    );

    Fixture {
        repo,
        directory,
        service,
        events,
    }
}

fn booking_request(professional_id: Uuid, time: SlotTime, mode: SessionMode) -> BookAppointmentRequest {
    BookAppointmentRequest {
        professional_id,
        date: monday(),
        time,
        mode,
        note: Some("First session".to_string()),
        evaluation_access_granted: true,
    }
}

#[tokio::test]
async fn booking_creates_pending_appointment_and_emits_event() {
    let professional = dr_x(vec![SessionMode::Online, SessionMode::InPerson]);
    let mut fx = fixture(&professional).await;

    let appointment = fx
        .service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await
        .unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.attended, None);
    assert_eq!(appointment.clinical_note, None);
    assert!(appointment.evaluation_access_granted);

    let event = fx.events.try_recv().unwrap();
    assert_eq!(event.appointment_id, appointment.id);
}

#[tokio::test]
async fn unknown_professional_is_rejected() {
    let professional = dr_x(vec![SessionMode::Online]);
    let fx = fixture(&professional).await;

    let result = fx
        .service
        .create(
            booking_request(Uuid::new_v4(), slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await;

    assert_eq!(result, Err(SchedulingError::ProfessionalNotFound));
}

#[tokio::test]
async fn past_date_is_rejected() {
    let professional = dr_x(vec![SessionMode::Online]);
    let fx = fixture(&professional).await;

    let today = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();
    let result = fx
        .service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            today,
        )
        .await;

    assert_eq!(result, Err(SchedulingError::InvalidDate));
}

#[tokio::test]
async fn mode_outside_professional_modes_is_rejected_without_side_effects() {
    let professional = dr_x(vec![SessionMode::Online]);
    let mut fx = fixture(&professional).await;

    let result = fx
        .service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::InPerson),
            Uuid::new_v4(),
            monday(),
        )
        .await;

    assert_eq!(result, Err(SchedulingError::InvalidMode));

    // No appointment was created and no event emitted.
    let taken = fx.repo.taken_slots(professional.id, monday()).await.unwrap();
    assert!(taken.is_empty());
    assert!(fx.events.try_recv().is_err());
}

#[tokio::test]
async fn slot_outside_template_is_rejected() {
    let professional = dr_x(vec![SessionMode::Online]);
    let fx = fixture(&professional).await;

    let result = fx
        .service
        .create(
            booking_request(professional.id, slot(11, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await;

    assert_eq!(result, Err(SchedulingError::SlotUnavailable));
}

#[tokio::test]
async fn booked_slot_disappears_from_resolution() {
    let professional = dr_x(vec![SessionMode::Online]);
    let fx = fixture(&professional).await;

    fx.service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await
        .unwrap();

    let stored = fx.directory.get(professional.id).await.unwrap().unwrap();
    let taken = fx.repo.taken_slots(professional.id, monday()).await.unwrap();
    let open = availability::resolve(&stored, monday(), monday(), &taken);

    assert_eq!(open, vec![slot(10, 0)]);
}

#[tokio::test]
async fn second_booking_for_same_slot_is_rejected() {
    let professional = dr_x(vec![SessionMode::Online]);
    let fx = fixture(&professional).await;

    fx.service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await
        .unwrap();

    let result = fx
        .service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await;

    assert_eq!(result, Err(SchedulingError::SlotUnavailable));
}

#[tokio::test]
async fn concurrent_bookings_for_same_slot_yield_exactly_one_appointment() {
    let professional = dr_x(vec![SessionMode::Online, SessionMode::InPerson]);
    let fx = fixture(&professional).await;
    let service = Arc::new(fx.service);

    let first = {
        let service = service.clone();
        let request = booking_request(professional.id, slot(9, 0), SessionMode::Online);
        tokio::spawn(async move { service.create(request, Uuid::new_v4(), monday()).await })
    };
    let second = {
        let service = service.clone();
        let request = booking_request(professional.id, slot(9, 0), SessionMode::Online);
        tokio::spawn(async move { service.create(request, Uuid::new_v4(), monday()).await })
    };

    let (first, second) = (first.await.unwrap(), second.await.unwrap());

    let successes = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one booking must win the race");

    let loser = if first.is_ok() { second } else { first };
    assert_matches!(loser, Err(SchedulingError::SlotUnavailable));

    let taken = fx.repo.taken_slots(professional.id, monday()).await.unwrap();
    assert_eq!(taken.len(), 1);
}

#[tokio::test]
async fn distinct_slots_for_same_professional_both_succeed() {
    let professional = dr_x(vec![SessionMode::Online]);
    let fx = fixture(&professional).await;

    fx.service
        .create(
            booking_request(professional.id, slot(9, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await
        .unwrap();
    fx.service
        .create(
            booking_request(professional.id, slot(10, 0), SessionMode::Online),
            Uuid::new_v4(),
            monday(),
        )
        .await
        .unwrap();

    let taken = fx.repo.taken_slots(professional.id, monday()).await.unwrap();
    assert_eq!(taken.len(), 2);
}
