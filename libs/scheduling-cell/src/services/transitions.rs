// libs/scheduling-cell/src/services/transitions.rs
use tracing::{debug, warn};

use crate::models::{AppointmentStatus, BusinessRuleContext, ValidationResult};

/// Structural status-transition table for the appointment lifecycle.
///
/// Purely about which status moves are ever legal; it knows nothing about
/// time. Callers pair it with the relevant action validator when a
/// transition corresponds to a user action.
pub struct TransitionAuthority;

impl TransitionAuthority {
    pub fn new() -> Self {
        Self
    }

    /// All statuses reachable from `current` in a single step.
    pub fn valid_transitions(&self, current: &AppointmentStatus) -> &'static [AppointmentStatus] {
        match current {
            AppointmentStatus::Scheduled => &[
                AppointmentStatus::Confirmed,
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
                AppointmentStatus::Rescheduled,
            ],
            AppointmentStatus::Confirmed => &[
                AppointmentStatus::CheckedIn,
                AppointmentStatus::Cancelled,
                AppointmentStatus::NoShow,
                AppointmentStatus::Rescheduled,
            ],
            AppointmentStatus::CheckedIn => &[
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Completed => &[AppointmentStatus::Rescheduled],
            AppointmentStatus::Cancelled => &[AppointmentStatus::Rescheduled],
            AppointmentStatus::NoShow => &[AppointmentStatus::Rescheduled],
            AppointmentStatus::Rescheduled => &[
                AppointmentStatus::Scheduled,
                AppointmentStatus::Confirmed,
            ],
        }
    }

    /// Validate a status move. Administrative override always permits.
    pub fn can_transition(
        &self,
        from: &AppointmentStatus,
        to: &AppointmentStatus,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        debug!("Validating status transition {} -> {}", from, to);

        if context.allow_override {
            return ValidationResult::ok();
        }

        if !self.valid_transitions(from).contains(to) {
            warn!("Invalid status transition attempted: {} -> {}", from, to);
            return ValidationResult::fail(format!(
                "Appointments cannot move from {} to {}",
                from, to
            ));
        }

        ValidationResult::ok()
    }
}

impl Default for TransitionAuthority {
    fn default() -> Self {
        Self::new()
    }
}
