// libs/appointment-cell/src/router.rs
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use shared_utils::extractor::auth_middleware;

use crate::{handlers, AppointmentState};

pub fn appointment_routes(state: AppointmentState) -> Router {
    // All appointment operations require authentication
    let protected_routes = Router::new()
        .route("/", post(handlers::book_appointment))
        .route("/mine", get(handlers::get_my_appointments))
        .route(
            "/{appointment_id}/status",
            put(handlers::update_appointment_status),
        )
        .route(
            "/{appointment_id}/evaluations",
            get(handlers::get_shared_evaluations),
        )
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ));

    Router::new().merge(protected_routes).with_state(state)
}
