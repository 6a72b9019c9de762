// libs/scheduling-cell/src/services/validators.rs
use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::{Appointment, AppointmentStatus, BusinessRuleContext, ValidationResult};
use crate::services::calendar::ClinicCalendar;
use crate::services::rules::{
    minutes_since, minutes_until, was_recently_updated, within_window, SchedulingRules,
};

/// One validator per user-facing appointment action.
///
/// Every method evaluates an ordered rule list against a snapshot and
/// returns the first failure, so at most one reason surfaces per call.
/// `context.allow_override` bypasses every timing, calendar and cooldown
/// check but never the status precondition.
pub struct ActionValidationService {
    rules: SchedulingRules,
    calendar: ClinicCalendar,
}

impl ActionValidationService {
    pub fn new(calendar: ClinicCalendar) -> Self {
        Self {
            rules: SchedulingRules::default(),
            calendar,
        }
    }

    pub fn with_rules(calendar: ClinicCalendar, rules: SchedulingRules) -> Self {
        Self { rules, calendar }
    }

    pub fn rules(&self) -> &SchedulingRules {
        &self.rules
    }

    pub fn calendar(&self) -> &ClinicCalendar {
        &self.calendar
    }

    /// Check-in: patient marks themselves present at the clinic.
    ///
    /// Window is `[scheduled - 30min, scheduled + 15min]`, both bounds
    /// inclusive, and the instant must fall within clinic working hours.
    pub fn can_check_in(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        debug!(
            "Evaluating check-in for appointment {} in status {}",
            appointment.id, appointment.status
        );

        if !matches!(
            appointment.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        ) {
            return ValidationResult::fail(
                "Check-in is only available for scheduled or confirmed appointments",
            );
        }

        if context.allow_override {
            return ValidationResult::ok();
        }

        if was_recently_updated(appointment.updated_at, now, self.rules.edit_cooldown_minutes) {
            return ValidationResult::fail(
                "This appointment was just updated, please wait a moment and try again",
            );
        }

        let opens_at = appointment.scheduled_at - Duration::minutes(self.rules.check_in_early_minutes);
        let closes_at = appointment.scheduled_at + Duration::minutes(self.rules.check_in_late_minutes);

        if now < opens_at {
            return ValidationResult::fail(format!(
                "Check-in available in {} minutes",
                minutes_until(now, opens_at)
            ));
        }
        if !within_window(now, opens_at, closes_at) {
            return ValidationResult::fail("Check-in window expired");
        }

        if !self.calendar.is_work_day(now) {
            return ValidationResult::fail("The clinic is closed today");
        }
        if !self.calendar.within_work_hours(now) {
            return ValidationResult::fail("Check-in is only available during clinic hours");
        }

        ValidationResult::ok()
    }

    /// Complete: doctor closes out a consultation that actually happened.
    pub fn can_complete(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        if appointment.status != AppointmentStatus::CheckedIn {
            return ValidationResult::fail("Only checked-in appointments can be completed");
        }

        if context.allow_override {
            return ValidationResult::ok();
        }

        let deadline =
            appointment.scheduled_at + Duration::minutes(self.rules.completion_window_minutes);
        if now > deadline {
            return ValidationResult::fail(format!(
                "Completion window expired {} minutes ago",
                minutes_since(now, deadline)
            ));
        }

        ValidationResult::ok()
    }

    /// Cancel: only future appointments can be called off.
    pub fn can_cancel(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        if !matches!(
            appointment.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        ) {
            return ValidationResult::fail(
                "Only scheduled or confirmed appointments can be cancelled",
            );
        }

        if context.allow_override {
            return ValidationResult::ok();
        }

        if appointment.scheduled_at < now {
            return ValidationResult::fail("Past appointments cannot be cancelled");
        }

        ValidationResult::ok()
    }

    /// No-show: recordable once the grace period after the scheduled time
    /// has elapsed without a check-in.
    pub fn can_mark_no_show(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        if !matches!(
            appointment.status,
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed
        ) {
            return ValidationResult::fail(
                "Only scheduled or confirmed appointments can be marked as a no-show",
            );
        }

        if context.allow_override {
            return ValidationResult::ok();
        }

        let grace_ends =
            appointment.scheduled_at + Duration::minutes(self.rules.no_show_grace_minutes);
        if now < grace_ends {
            return ValidationResult::fail(format!(
                "No-show can be recorded in {} minutes",
                minutes_until(now, grace_ends)
            ));
        }

        ValidationResult::ok()
    }

    /// Reschedule: live appointments need advance notice; cancelled and
    /// no-show appointments can be rebooked at any time.
    pub fn can_reschedule(
        &self,
        appointment: &Appointment,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        let live = match appointment.status {
            AppointmentStatus::Scheduled | AppointmentStatus::Confirmed => true,
            AppointmentStatus::Cancelled | AppointmentStatus::NoShow => false,
            _ => {
                return ValidationResult::fail("This appointment cannot be rescheduled");
            }
        };

        if context.allow_override || !live {
            return ValidationResult::ok();
        }

        let notice = Duration::minutes(self.rules.reschedule_notice_minutes);
        if appointment.scheduled_at - now <= notice {
            return ValidationResult::fail(format!(
                "Appointments can only be rescheduled more than {} hours in advance",
                self.rules.reschedule_notice_minutes / 60
            ));
        }

        ValidationResult::ok()
    }

    /// Calendar verdict on a proposed new slot, used alongside
    /// `can_reschedule` when a concrete target time is on the table.
    pub fn validate_reschedule_slot(
        &self,
        proposed_time: DateTime<Utc>,
        now: DateTime<Utc>,
        context: &BusinessRuleContext,
    ) -> ValidationResult {
        if context.allow_override {
            return ValidationResult::ok();
        }
        self.calendar.validate_reschedule_instant(proposed_time, now)
    }
}

impl Default for ActionValidationService {
    fn default() -> Self {
        Self::new(ClinicCalendar::default())
    }
}
