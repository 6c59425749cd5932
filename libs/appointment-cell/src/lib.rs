use std::sync::Arc;

use evaluation_cell::store::EvaluationStore;
use professional_cell::directory::ProfessionalDirectory;
use shared_config::AppConfig;

use crate::repository::AppointmentRepository;
use crate::services::notify::BookingNotifier;

pub mod handlers;
pub mod models;
pub mod repository;
pub mod router;
pub mod services;

#[derive(Clone)]
pub struct AppointmentState {
    pub config: Arc<AppConfig>,
    pub repo: Arc<dyn AppointmentRepository>,
    pub directory: Arc<dyn ProfessionalDirectory>,
    pub evaluations: Arc<dyn EvaluationStore>,
    pub notifier: Arc<dyn BookingNotifier>,
}
