// libs/appointment-cell/src/services/notify.rs
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Fire-and-forget message handed to the external notification service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingEvent {
    pub appointment_id: Uuid,
}

/// Delivery (reminders, emails) is an external concern; the core only emits.
/// A failed emit never fails the booking.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn booking_created(&self, appointment_id: Uuid);
}

/// Notifier pushing events onto an in-process channel drained by whatever
/// bridges to the real delivery service.
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<BookingEvent>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BookingEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

#[async_trait]
impl BookingNotifier for ChannelNotifier {
    async fn booking_created(&self, appointment_id: Uuid) {
        let event = BookingEvent { appointment_id };
        if self.tx.send(event).is_err() {
            warn!(
                "Notification channel closed, dropping booking event for {}",
                appointment_id
            );
        } else {
            debug!("Booking created event emitted for {}", appointment_id);
        }
    }
}
