// libs/scheduling-cell/tests/validators_test.rs
//
// Action validator rules: window boundaries, status preconditions, override
// semantics and the validator/transition-table consistency property.
//
// Fixture appointment is scheduled for Tuesday 2025-06-10 09:00 clinic time
// (07:00 UTC, Paris is UTC+2 in June), well inside working hours.

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use scheduling_cell::models::{
    Appointment, AppointmentAction, AppointmentStatus, BusinessRuleContext,
};
use scheduling_cell::services::transitions::TransitionAuthority;
use scheduling_cell::services::validators::ActionValidationService;

fn scheduled_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 10, 7, 0, 0).unwrap()
}

fn appointment(status: AppointmentStatus) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        scheduled_at: scheduled_time(),
        status,
        updated_at: None,
    }
}

fn ctx() -> BusinessRuleContext {
    BusinessRuleContext::default()
}

// ------------------------------------------------------------------------------
// check_in
// ------------------------------------------------------------------------------

#[test]
fn check_in_window_boundaries_are_inclusive() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Scheduled);
    let sched = scheduled_time();

    assert!(!service.can_check_in(&appt, sched - Duration::minutes(31), &ctx()).valid);
    assert!(service.can_check_in(&appt, sched - Duration::minutes(30), &ctx()).valid);
    assert!(service.can_check_in(&appt, sched, &ctx()).valid);
    assert!(service.can_check_in(&appt, sched + Duration::minutes(15), &ctx()).valid);
    assert!(!service.can_check_in(&appt, sched + Duration::minutes(16), &ctx()).valid);
}

#[test]
fn check_in_requires_scheduled_or_confirmed_status() {
    let service = ActionValidationService::default();
    let sched = scheduled_time();

    for status in [
        AppointmentStatus::CheckedIn,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
        AppointmentStatus::Rescheduled,
    ] {
        let verdict = service.can_check_in(&appointment(status), sched, &ctx());
        assert!(!verdict.valid, "check-in must be rejected for {}", status);
    }

    assert!(service.can_check_in(&appointment(AppointmentStatus::Confirmed), sched, &ctx()).valid);
}

#[test]
fn check_in_too_early_reports_a_countdown() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Scheduled);

    // 40 minutes before: the window opens in 10 minutes.
    let verdict = service.can_check_in(&appt, scheduled_time() - Duration::minutes(40), &ctx());
    assert!(!verdict.valid);
    assert_eq!(verdict.reason.unwrap(), "Check-in available in 10 minutes");
}

#[test]
fn check_in_too_late_reports_expiry() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Scheduled);

    let verdict = service.can_check_in(&appt, scheduled_time() + Duration::minutes(40), &ctx());
    assert!(!verdict.valid);
    assert_eq!(verdict.reason.unwrap(), "Check-in window expired");
}

#[test]
fn check_in_is_throttled_right_after_an_edit() {
    let service = ActionValidationService::default();
    let now = scheduled_time();
    let mut appt = appointment(AppointmentStatus::Scheduled);
    appt.updated_at = Some(now - Duration::seconds(60));

    let verdict = service.can_check_in(&appt, now, &ctx());
    assert!(!verdict.valid);
    assert!(verdict.reason.unwrap().contains("just updated"));

    // Once the cooldown has passed the same appointment checks in fine.
    appt.updated_at = Some(now - Duration::minutes(3));
    assert!(service.can_check_in(&appt, now, &ctx()).valid);
}

#[test]
fn check_in_is_rejected_outside_clinic_hours() {
    let service = ActionValidationService::default();
    // Saturday 2025-06-14 10:00 local (08:00 UTC).
    let weekend = Utc.with_ymd_and_hms(2025, 6, 14, 8, 0, 0).unwrap();
    let mut appt = appointment(AppointmentStatus::Scheduled);
    appt.scheduled_at = weekend;

    let verdict = service.can_check_in(&appt, weekend, &ctx());
    assert!(!verdict.valid);
    assert!(verdict.reason.unwrap().contains("closed"));
}

// ------------------------------------------------------------------------------
// complete
// ------------------------------------------------------------------------------

#[test]
fn complete_requires_checked_in_status() {
    let service = ActionValidationService::default();
    let sched = scheduled_time();

    let verdict = service.can_complete(&appointment(AppointmentStatus::Scheduled), sched, &ctx());
    assert!(!verdict.valid);

    assert!(service.can_complete(&appointment(AppointmentStatus::CheckedIn), sched, &ctx()).valid);
}

#[test]
fn complete_window_closes_after_two_hours() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::CheckedIn);
    let sched = scheduled_time();

    assert!(service.can_complete(&appt, sched + Duration::minutes(120), &ctx()).valid);

    let verdict = service.can_complete(&appt, sched + Duration::minutes(150), &ctx());
    assert!(!verdict.valid);
    assert_eq!(verdict.reason.unwrap(), "Completion window expired 30 minutes ago");
}

// ------------------------------------------------------------------------------
// cancel
// ------------------------------------------------------------------------------

#[test]
fn cancel_rejects_past_appointments() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Confirmed);
    let sched = scheduled_time();

    assert!(service.can_cancel(&appt, sched - Duration::hours(3), &ctx()).valid);
    // Exactly on time is not "in the past".
    assert!(service.can_cancel(&appt, sched, &ctx()).valid);

    let verdict = service.can_cancel(&appt, sched + Duration::minutes(1), &ctx());
    assert!(!verdict.valid);
    assert!(verdict.reason.unwrap().contains("Past appointments"));
}

#[test]
fn cancel_requires_a_live_status() {
    let service = ActionValidationService::default();
    let now = scheduled_time() - Duration::hours(3);

    for status in [
        AppointmentStatus::CheckedIn,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
        AppointmentStatus::Rescheduled,
    ] {
        assert!(!service.can_cancel(&appointment(status), now, &ctx()).valid);
    }
}

// ------------------------------------------------------------------------------
// no_show
// ------------------------------------------------------------------------------

#[test]
fn no_show_waits_for_the_grace_period() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Scheduled);
    let sched = scheduled_time();

    let verdict = service.can_mark_no_show(&appt, sched + Duration::minutes(5), &ctx());
    assert!(!verdict.valid);
    assert_eq!(verdict.reason.unwrap(), "No-show can be recorded in 10 minutes");

    assert!(service.can_mark_no_show(&appt, sched + Duration::minutes(15), &ctx()).valid);
    assert!(service.can_mark_no_show(&appt, sched + Duration::hours(2), &ctx()).valid);
}

// ------------------------------------------------------------------------------
// reschedule
// ------------------------------------------------------------------------------

#[test]
fn reschedule_needs_notice_for_live_appointments() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Scheduled);
    let sched = scheduled_time();

    assert!(service.can_reschedule(&appt, sched - Duration::minutes(121), &ctx()).valid);

    // Exactly two hours of notice is not "more than" two hours.
    let verdict = service.can_reschedule(&appt, sched - Duration::minutes(120), &ctx());
    assert!(!verdict.valid);
    assert!(verdict.reason.unwrap().contains("2 hours in advance"));
}

#[test]
fn cancelled_and_no_show_appointments_reschedule_any_time() {
    let service = ActionValidationService::default();
    let sched = scheduled_time();

    for status in [AppointmentStatus::Cancelled, AppointmentStatus::NoShow] {
        let appt = appointment(status);
        assert!(service.can_reschedule(&appt, sched + Duration::days(5), &ctx()).valid);
        assert!(service.can_reschedule(&appt, sched - Duration::days(5), &ctx()).valid);
    }
}

#[test]
fn completed_and_in_flight_appointments_never_reschedule() {
    let service = ActionValidationService::default();
    let now = scheduled_time() - Duration::days(1);

    for status in [
        AppointmentStatus::CheckedIn,
        AppointmentStatus::Completed,
        AppointmentStatus::Rescheduled,
    ] {
        assert!(!service.can_reschedule(&appointment(status), now, &ctx()).valid);
    }
}

// ------------------------------------------------------------------------------
// override semantics
// ------------------------------------------------------------------------------

#[test]
fn override_bypasses_timing_but_not_status() {
    let service = ActionValidationService::default();
    let admin = BusinessRuleContext::with_override();
    let sched = scheduled_time();

    // Hours outside the window, on a valid status: override wins.
    let live = appointment(AppointmentStatus::Scheduled);
    assert!(service.can_check_in(&live, sched + Duration::hours(6), &admin).valid);
    assert!(service.can_cancel(&live, sched + Duration::hours(6), &admin).valid);
    assert!(service.can_reschedule(&live, sched - Duration::minutes(10), &admin).valid);

    // Wrong status: override never helps.
    let cancelled = appointment(AppointmentStatus::Cancelled);
    assert!(!service.can_check_in(&cancelled, sched, &admin).valid);
    assert!(!service.can_complete(&cancelled, sched, &admin).valid);
    assert!(!service.can_cancel(&cancelled, sched, &admin).valid);
    assert!(!service.can_mark_no_show(&cancelled, sched, &admin).valid);
}

// ------------------------------------------------------------------------------
// cross-cutting properties
// ------------------------------------------------------------------------------

#[test]
fn validators_are_idempotent() {
    let service = ActionValidationService::default();
    let appt = appointment(AppointmentStatus::Scheduled);
    let now = scheduled_time() - Duration::minutes(40);

    let first = service.can_check_in(&appt, now, &ctx());
    let second = service.can_check_in(&appt, now, &ctx());
    assert_eq!(first, second);
}

#[test]
fn valid_actions_always_have_a_legal_transition() {
    let service = ActionValidationService::default();
    let authority = TransitionAuthority::new();
    let sched = scheduled_time();

    // A permissive instant per action, so timing never masks the property.
    let probes = [
        (AppointmentAction::CheckIn, sched),
        (AppointmentAction::Complete, sched + Duration::minutes(30)),
        (AppointmentAction::Cancel, sched - Duration::hours(3)),
        (AppointmentAction::NoShow, sched + Duration::minutes(20)),
        (AppointmentAction::Reschedule, sched - Duration::hours(5)),
    ];

    for status in AppointmentStatus::ALL {
        let appt = appointment(status);
        for (action, now) in probes {
            let verdict = match action {
                AppointmentAction::CheckIn => service.can_check_in(&appt, now, &ctx()),
                AppointmentAction::Complete => service.can_complete(&appt, now, &ctx()),
                AppointmentAction::Cancel => service.can_cancel(&appt, now, &ctx()),
                AppointmentAction::NoShow => service.can_mark_no_show(&appt, now, &ctx()),
                AppointmentAction::Reschedule => service.can_reschedule(&appt, now, &ctx()),
                AppointmentAction::ViewHistory => continue,
            };

            if verdict.valid {
                let target = action.target_status().unwrap();
                assert!(
                    authority.can_transition(&status, &target, &ctx()).valid,
                    "{} is valid from {} but {} -> {} is not in the transition table",
                    action,
                    status,
                    status,
                    target
                );
            }
        }
    }
}
