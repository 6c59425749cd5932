// libs/professional-cell/src/router.rs
use axum::{middleware, routing::get, Router};

use shared_utils::extractor::auth_middleware;

use crate::{handlers, ProfessionalState};

pub fn professional_routes(state: ProfessionalState) -> Router {
    let protected_routes = Router::new()
        .route("/", get(handlers::list_professionals))
        .layer(middleware::from_fn_with_state(
            state.config.clone(),
            auth_middleware,
        ));

    Router::new().merge(protected_routes).with_state(state)
}
