use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub bind_port: u16,
    /// Optional JSON export from the professional profile service used to
    /// seed the in-memory directory at startup.
    pub professional_seed_path: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            jwt_secret: env::var("PORTAL_JWT_SECRET")
                .unwrap_or_else(|_| {
                    warn!("PORTAL_JWT_SECRET not set, using empty value");
                    String::new()
                }),
            bind_port: env::var("PORTAL_PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
            professional_seed_path: env::var("PORTAL_PROFESSIONAL_SEED").ok(),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}
