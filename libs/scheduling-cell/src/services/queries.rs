// libs/scheduling-cell/src/services/queries.rs
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::{
    ActionAvailability, Appointment, AppointmentAction, AppointmentStatus, BusinessRuleContext,
    UrgencyAssessment, UrgencySeverity, ValidationResult,
};
use crate::services::rules::{minutes_since, minutes_until};
use crate::services::validators::ActionValidationService;

/// Suggestion priority. Cancel, no-show and reschedule are deliberately
/// never suggested, only explicitly invoked.
const SUGGESTION_PRIORITY: [AppointmentAction; 2] =
    [AppointmentAction::CheckIn, AppointmentAction::Complete];

/// Aggregate views over the action validators, consumed by dashboards and
/// button rendering so UI code never re-implements rule logic.
pub struct AppointmentQueryService {
    validators: ActionValidationService,
}

impl AppointmentQueryService {
    pub fn new(validators: ActionValidationService) -> Self {
        Self { validators }
    }

    pub fn validators(&self) -> &ActionValidationService {
        &self.validators
    }

    /// Dispatch a single action to its validator.
    pub fn validate_action(
        &self,
        action: AppointmentAction,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        match action {
            AppointmentAction::CheckIn => self.validators.can_check_in(appointment, now, context),
            AppointmentAction::Complete => self.validators.can_complete(appointment, now, context),
            AppointmentAction::Cancel => self.validators.can_cancel(appointment, now, context),
            AppointmentAction::NoShow => {
                self.validators.can_mark_no_show(appointment, now, context)
            }
            AppointmentAction::Reschedule => {
                self.validators.can_reschedule(appointment, now, context)
            }
            // History is read-only and always accessible.
            AppointmentAction::ViewHistory => ValidationResult::ok(),
        }
    }

    /// Run every validator and return the full availability list.
    pub fn available_actions(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> Vec<ActionAvailability> {
        debug!(
            "Computing available actions for appointment {} in status {}",
            appointment.id, appointment.status
        );

        AppointmentAction::ALL
            .iter()
            .map(|&action| {
                let verdict = self.validate_action(action, appointment, now, context);
                ActionAvailability {
                    action,
                    valid: verdict.valid,
                    reason: verdict.reason,
                }
            })
            .collect()
    }

    /// Highest-priority currently-valid action, or `None`.
    pub fn suggest_next_action(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> Option<AppointmentAction> {
        SUGGESTION_PRIORITY
            .iter()
            .copied()
            .find(|&action| self.validate_action(action, appointment, now, context).valid)
    }

    /// Heuristic dashboard flag for appointments that need staff attention.
    pub fn needs_urgent_attention(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
    ) -> UrgencyAssessment {
        let rules = self.validators.rules();
        let wait = Duration::minutes(rules.urgency_wait_minutes);

        match appointment.status {
            AppointmentStatus::CheckedIn => {
                if now - appointment.scheduled_at > wait {
                    let waiting = minutes_since(now, appointment.scheduled_at);
                    let severity = if waiting > rules.urgency_escalation_minutes {
                        UrgencySeverity::High
                    } else {
                        UrgencySeverity::Medium
                    };
                    return UrgencyAssessment::flag(
                        format!("Patient has been waiting {} minutes", waiting),
                        severity,
                    );
                }
            }
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed => {
                if now - appointment.scheduled_at > wait {
                    return UrgencyAssessment::flag(
                        format!(
                            "Appointment is {} minutes overdue with no check-in",
                            minutes_since(now, appointment.scheduled_at)
                        ),
                        UrgencySeverity::Medium,
                    );
                }
                // Informational nudge for unconfirmed appointments only.
                if appointment.status == AppointmentStatus::Scheduled {
                    let until_start = appointment.scheduled_at - now;
                    if until_start > Duration::zero() && until_start <= Duration::minutes(60) {
                        return UrgencyAssessment::flag(
                            format!(
                                "Appointment starts in {} minutes and is not confirmed",
                                minutes_until(now, appointment.scheduled_at)
                            ),
                            UrgencySeverity::Low,
                        );
                    }
                }
            }
            _ => {}
        }

        UrgencyAssessment::none()
    }
}

impl Default for AppointmentQueryService {
    fn default() -> Self {
        Self::new(ActionValidationService::default())
    }
}
