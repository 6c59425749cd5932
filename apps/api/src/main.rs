use std::net::SocketAddr;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{self, TraceLayer};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use appointment_cell::repository::InMemoryAppointmentRepository;
use appointment_cell::services::notify::ChannelNotifier;
use appointment_cell::AppointmentState;
use evaluation_cell::store::InMemoryEvaluationStore;
use professional_cell::directory::InMemoryProfessionalDirectory;
use professional_cell::models::Professional;
use professional_cell::ProfessionalState;
use shared_config::AppConfig;

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting student support portal API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());

    // Wire the stores. The professional directory and evaluation store stand
    // in for their external services; the appointment repository is the one
    // store this core owns.
    let directory = Arc::new(InMemoryProfessionalDirectory::new());
    seed_directory(&config, &directory).await;

    let repo = Arc::new(InMemoryAppointmentRepository::new());
    let evaluations = Arc::new(InMemoryEvaluationStore::new());

    let (notifier, mut booking_events) = ChannelNotifier::new();

    // Stand-in for the external notification delivery service.
    tokio::spawn(async move {
        while let Some(event) = booking_events.recv().await {
            info!("Booking created event: {}", event.appointment_id);
        }
    });

    let professional_state = ProfessionalState {
        config: config.clone(),
        directory: directory.clone(),
    };
    let appointment_state = AppointmentState {
        config: config.clone(),
        repo,
        directory,
        evaluations,
        notifier: Arc::new(notifier),
    };

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the application router
    let app = router::create_router(professional_state, appointment_state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.bind_port));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// Load the professional profile export named in config, if any.
async fn seed_directory(config: &AppConfig, directory: &InMemoryProfessionalDirectory) {
    let Some(path) = &config.professional_seed_path else {
        warn!("No professional seed configured, directory starts empty");
        return;
    };

    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Vec<Professional>>(&raw) {
            Ok(professionals) => {
                info!(
                    "Loaded {} professionals from {}",
                    professionals.len(),
                    path
                );
                directory.load(professionals).await;
            }
            Err(e) => warn!("Failed to parse professional seed {}: {}", path, e),
        },
        Err(e) => warn!("Failed to read professional seed {}: {}", path, e),
    }
}
