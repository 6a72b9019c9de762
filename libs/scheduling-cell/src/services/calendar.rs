// libs/scheduling-cell/src/services/calendar.rs
use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use tracing::warn;

use shared_config::ClinicConfig;

use crate::models::{SchedulingError, ValidationResult};

/// Working-hours configuration for a clinic.
///
/// Hours follow the 8-18 variant of the clinic schedule; `close_hour` and
/// `lunch_end_hour` are exclusive bounds.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub open_hour: u32,
    pub close_hour: u32,
    pub lunch_start_hour: u32,
    pub lunch_end_hour: u32,
    pub slot_duration_minutes: u32,
    pub work_days: Vec<Weekday>,
    pub timezone: Tz,
    pub max_advance_days: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 18,
            lunch_start_hour: 12,
            lunch_end_hour: 13,
            slot_duration_minutes: 30,
            work_days: vec![
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
            ],
            timezone: chrono_tz::Europe::Paris,
            max_advance_days: 60,
        }
    }
}

impl CalendarConfig {
    /// Build a config with an IANA timezone name, e.g. `"Europe/Paris"`.
    pub fn with_timezone(name: &str) -> Result<Self, SchedulingError> {
        let timezone: Tz = name
            .parse()
            .map_err(|_| SchedulingError::InvalidTimezone(name.to_string()))?;
        Ok(Self {
            timezone,
            ..Default::default()
        })
    }
}

/// Timezone-aware clinic schedule.
///
/// Every hour/weekday extraction happens in the clinic's timezone. Reading
/// the hour of a UTC instant directly would be wrong whenever the process
/// runs in a different timezone than the clinic, so all rule code goes
/// through this service instead of calling `Timelike` on raw instants.
#[derive(Debug, Clone)]
pub struct ClinicCalendar {
    config: CalendarConfig,
}

impl ClinicCalendar {
    pub fn new(config: CalendarConfig) -> Self {
        Self { config }
    }

    /// Build a calendar from the environment-backed clinic configuration.
    /// An unparseable timezone falls back to the default clinic timezone.
    pub fn from_config(config: &ClinicConfig) -> Self {
        let calendar_config = match CalendarConfig::with_timezone(&config.clinic_timezone) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("{}, falling back to default timezone", e);
                CalendarConfig::default()
            }
        };

        Self::new(CalendarConfig {
            open_hour: config.open_hour,
            close_hour: config.close_hour,
            lunch_start_hour: config.lunch_start_hour,
            lunch_end_hour: config.lunch_end_hour,
            slot_duration_minutes: config.slot_duration_minutes,
            max_advance_days: config.max_advance_days,
            ..calendar_config
        })
    }

    pub fn config(&self) -> &CalendarConfig {
        &self.config
    }

    /// Convert a UTC instant into clinic-local time.
    fn local(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        self.config.timezone.from_utc_datetime(&instant.naive_utc())
    }

    /// Weekday (in clinic timezone) is one of the configured working days.
    pub fn is_work_day(&self, instant: DateTime<Utc>) -> bool {
        self.config.work_days.contains(&self.local(instant).weekday())
    }

    /// Hour (in clinic timezone) falls within `[open_hour, close_hour)`.
    pub fn within_work_hours(&self, instant: DateTime<Utc>) -> bool {
        let hour = self.local(instant).hour();
        hour >= self.config.open_hour && hour < self.config.close_hour
    }

    /// Hour (in clinic timezone) falls within the lunch blackout.
    pub fn is_lunch_time(&self, instant: DateTime<Utc>) -> bool {
        let hour = self.local(instant).hour();
        hour >= self.config.lunch_start_hour && hour < self.config.lunch_end_hour
    }

    /// Minute-of-hour aligns with the clinic's scheduling granularity.
    pub fn is_valid_slot(&self, instant: DateTime<Utc>) -> bool {
        self.local(instant).minute() % self.config.slot_duration_minutes == 0
    }

    /// Full verdict on a proposed reschedule target. Checks run in order and
    /// the first failure is returned, so the caller gets exactly one reason.
    pub fn validate_reschedule_instant(
        &self,
        instant: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> ValidationResult {
        if instant <= now {
            return ValidationResult::fail("New appointment time must be in the future");
        }
        if !self.is_work_day(instant) {
            return ValidationResult::fail("Clinic is closed on the selected day");
        }
        if !self.within_work_hours(instant) {
            return ValidationResult::fail(format!(
                "Appointments are only available between {}:00 and {}:00",
                self.config.open_hour, self.config.close_hour
            ));
        }
        if self.is_lunch_time(instant) {
            return ValidationResult::fail("The clinic is closed for lunch at that time");
        }
        if !self.is_valid_slot(instant) {
            return ValidationResult::fail(format!(
                "Appointments must start on a {}-minute slot boundary",
                self.config.slot_duration_minutes
            ));
        }
        if instant - now > Duration::days(self.config.max_advance_days) {
            return ValidationResult::fail(format!(
                "Appointments cannot be booked more than {} days in advance",
                self.config.max_advance_days
            ));
        }

        ValidationResult::ok()
    }
}

impl Default for ClinicCalendar {
    fn default() -> Self {
        Self::new(CalendarConfig::default())
    }
}
