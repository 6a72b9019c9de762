// libs/scheduling-cell/src/services/rules.rs
use chrono::{DateTime, Duration, Utc};

/// Named timing constants for the appointment lifecycle.
///
/// One instance of this struct parameterizes every action validator, so a
/// policy change (say, a longer no-show grace period) touches one place.
#[derive(Debug, Clone)]
pub struct SchedulingRules {
    /// Minutes before the scheduled time at which check-in opens.
    pub check_in_early_minutes: i64,
    /// Minutes after the scheduled time at which check-in closes.
    pub check_in_late_minutes: i64,
    /// Minutes after the scheduled time during which completion is allowed.
    pub completion_window_minutes: i64,
    /// Minutes after the scheduled time before a no-show can be recorded.
    pub no_show_grace_minutes: i64,
    /// Minimum notice, in minutes, for rescheduling a live appointment.
    pub reschedule_notice_minutes: i64,
    /// Suppress check-in this soon after the record was last edited.
    pub edit_cooldown_minutes: i64,
    /// Waiting/overdue minutes before an appointment is flagged urgent.
    pub urgency_wait_minutes: i64,
    /// Waiting minutes before the urgency flag escalates to high severity.
    pub urgency_escalation_minutes: i64,
}

impl Default for SchedulingRules {
    fn default() -> Self {
        Self {
            check_in_early_minutes: 30,
            check_in_late_minutes: 15,
            completion_window_minutes: 120,
            no_show_grace_minutes: 15,
            reschedule_notice_minutes: 120,
            edit_cooldown_minutes: 2,
            urgency_wait_minutes: 30,
            urgency_escalation_minutes: 60,
        }
    }
}

/// Whole minutes from `now` until `target`, rounded up so a countdown never
/// reads "0 minutes" while time actually remains.
pub fn minutes_until(now: DateTime<Utc>, target: DateTime<Utc>) -> i64 {
    let seconds = (target - now).num_seconds();
    if seconds <= 0 {
        0
    } else {
        (seconds + 59) / 60
    }
}

/// Whole minutes elapsed since `moment`, floored. Negative offsets clamp
/// to zero.
pub fn minutes_since(now: DateTime<Utc>, moment: DateTime<Utc>) -> i64 {
    (now - moment).num_minutes().max(0)
}

/// True if `instant` lies within `[start, end]`, both bounds inclusive.
pub fn within_window(instant: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    instant >= start && instant <= end
}

/// Best-effort double-submission throttle: true if the record was edited
/// within the cooldown. Not a concurrency guarantee - the supplied
/// `updated_at` may already be stale when two writers race.
pub fn was_recently_updated(
    updated_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    cooldown_minutes: i64,
) -> bool {
    match updated_at {
        Some(updated) => now - updated < Duration::minutes(cooldown_minutes),
        None => false,
    }
}
