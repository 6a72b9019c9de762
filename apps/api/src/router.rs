use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use scheduling_cell::router::scheduling_routes;
use shared_config::ClinicConfig;

pub fn create_router(state: Arc<ClinicConfig>) -> Router {
    Router::new()
        .route("/", get(|| async { "Clinic scheduling rules API is running!" }))
        .nest("/scheduling", scheduling_routes(state.clone()))
}
