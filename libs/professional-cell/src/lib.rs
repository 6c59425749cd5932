use std::sync::Arc;

use shared_config::AppConfig;

use crate::directory::ProfessionalDirectory;

pub mod directory;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

#[derive(Clone)]
pub struct ProfessionalState {
    pub config: Arc<AppConfig>,
    pub directory: Arc<dyn ProfessionalDirectory>,
}
