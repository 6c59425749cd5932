use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use appointment_cell::AppointmentState;
use professional_cell::router::professional_routes;
use professional_cell::ProfessionalState;

pub fn create_router(
    professional_state: ProfessionalState,
    appointment_state: AppointmentState,
) -> Router {
    Router::new()
        .route("/", get(|| async { "Student support portal API is running!" }))
        .nest("/professionals", professional_routes(professional_state))
        .nest("/appointments", appointment_routes(appointment_state))
}
