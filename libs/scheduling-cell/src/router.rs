// libs/scheduling-cell/src/router.rs
use std::sync::Arc;

use axum::{routing::post, Router};

use shared_config::ClinicConfig;

use crate::handlers;

pub fn scheduling_routes(state: Arc<ClinicConfig>) -> Router {
    Router::new()
        // Single-action validation for write paths
        .route("/validate/{action}", post(handlers::validate_action))
        // Aggregate views for dashboards and button rendering
        .route("/actions", post(handlers::available_actions))
        .route("/suggestion", post(handlers::suggest_next_action))
        .route("/urgency", post(handlers::urgency))
        // Structural transition and calendar checks
        .route("/transition", post(handlers::validate_transition))
        .route("/reschedule-slot", post(handlers::validate_reschedule_slot))
        .with_state(state)
}
