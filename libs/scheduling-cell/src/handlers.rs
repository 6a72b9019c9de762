// libs/scheduling-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use shared_config::ClinicConfig;
use shared_models::error::AppError;

use crate::models::{
    AppointmentAction, BusinessRuleContext, EvaluateActionRequest, RescheduleSlotRequest,
    TransitionRequest,
};
use crate::services::calendar::ClinicCalendar;
use crate::services::queries::AppointmentQueryService;
use crate::services::transitions::TransitionAuthority;
use crate::services::validators::ActionValidationService;

// The cell is stateless: callers POST an appointment snapshot and get a
// verdict back. Services are cheap value objects, built per request from
// the shared clinic configuration.
fn query_service(config: &ClinicConfig) -> AppointmentQueryService {
    AppointmentQueryService::new(ActionValidationService::new(ClinicCalendar::from_config(
        config,
    )))
}

fn unpack_context(context: Option<BusinessRuleContext>) -> (BusinessRuleContext, chrono::DateTime<Utc>) {
    let context = context.unwrap_or_default();
    let now = context.current_time.unwrap_or_else(Utc::now);
    (context, now)
}

/// Validate a single action against an appointment snapshot.
#[axum::debug_handler]
pub async fn validate_action(
    State(state): State<Arc<ClinicConfig>>,
    Path(action): Path<String>,
    Json(request): Json<EvaluateActionRequest>,
) -> Result<Json<Value>, AppError> {
    let action: AppointmentAction = action
        .parse()
        .map_err(|e: crate::models::SchedulingError| AppError::BadRequest(e.to_string()))?;

    let (context, now) = unpack_context(request.context);
    let verdict = query_service(&state).validate_action(action, &request.appointment, now, &context);

    Ok(Json(json!({
        "success": true,
        "data": {
            "action": action,
            "valid": verdict.valid,
            "reason": verdict.reason,
        }
    })))
}

/// Full availability list for UI button rendering.
#[axum::debug_handler]
pub async fn available_actions(
    State(state): State<Arc<ClinicConfig>>,
    Json(request): Json<EvaluateActionRequest>,
) -> Result<Json<Value>, AppError> {
    let (context, now) = unpack_context(request.context);
    let actions = query_service(&state).available_actions(&request.appointment, now, &context);

    Ok(Json(json!({
        "success": true,
        "data": actions
    })))
}

/// Highest-priority valid action, if any.
#[axum::debug_handler]
pub async fn suggest_next_action(
    State(state): State<Arc<ClinicConfig>>,
    Json(request): Json<EvaluateActionRequest>,
) -> Result<Json<Value>, AppError> {
    let (context, now) = unpack_context(request.context);
    let suggestion = query_service(&state).suggest_next_action(&request.appointment, now, &context);

    Ok(Json(json!({
        "success": true,
        "data": { "suggested_action": suggestion }
    })))
}

/// Dashboard urgency assessment for one appointment.
#[axum::debug_handler]
pub async fn urgency(
    State(state): State<Arc<ClinicConfig>>,
    Json(request): Json<EvaluateActionRequest>,
) -> Result<Json<Value>, AppError> {
    let (_, now) = unpack_context(request.context);
    let assessment = query_service(&state).needs_urgent_attention(&request.appointment, now);

    Ok(Json(json!({
        "success": true,
        "data": assessment
    })))
}

/// Structural transition check between two statuses.
#[axum::debug_handler]
pub async fn validate_transition(
    State(_state): State<Arc<ClinicConfig>>,
    Json(request): Json<TransitionRequest>,
) -> Result<Json<Value>, AppError> {
    let context = request.context.unwrap_or_default();
    let verdict = TransitionAuthority::new().can_transition(&request.from, &request.to, &context);

    Ok(Json(json!({
        "success": true,
        "data": {
            "from": request.from,
            "to": request.to,
            "valid": verdict.valid,
            "reason": verdict.reason,
        }
    })))
}

/// Calendar verdict on a proposed reschedule slot.
#[axum::debug_handler]
pub async fn validate_reschedule_slot(
    State(state): State<Arc<ClinicConfig>>,
    Json(request): Json<RescheduleSlotRequest>,
) -> Result<Json<Value>, AppError> {
    let (context, now) = unpack_context(request.context);
    let verdict = query_service(&state).validators().validate_reschedule_slot(
        request.proposed_time,
        now,
        &context,
    );

    Ok(Json(json!({
        "success": true,
        "data": verdict
    })))
}
