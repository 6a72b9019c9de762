use std::env;
use tracing::warn;

/// Clinic-wide scheduling configuration loaded from the environment.
///
/// Every value has a default so the service can boot in a bare environment;
/// missing or malformed variables are logged, not fatal.
#[derive(Debug, Clone)]
pub struct ClinicConfig {
    pub clinic_timezone: String,
    pub open_hour: u32,
    pub close_hour: u32,
    pub lunch_start_hour: u32,
    pub lunch_end_hour: u32,
    pub slot_duration_minutes: u32,
    pub max_advance_days: i64,
}

impl ClinicConfig {
    pub fn from_env() -> Self {
        Self {
            clinic_timezone: env::var("CLINIC_TIMEZONE")
                .unwrap_or_else(|_| {
                    warn!("CLINIC_TIMEZONE not set, defaulting to Europe/Paris");
                    "Europe/Paris".to_string()
                }),
            open_hour: parse_env_u32("CLINIC_OPEN_HOUR", 8),
            close_hour: parse_env_u32("CLINIC_CLOSE_HOUR", 18),
            lunch_start_hour: parse_env_u32("CLINIC_LUNCH_START_HOUR", 12),
            lunch_end_hour: parse_env_u32("CLINIC_LUNCH_END_HOUR", 13),
            slot_duration_minutes: parse_env_u32("CLINIC_SLOT_DURATION_MINUTES", 30),
            max_advance_days: parse_env_u32("CLINIC_MAX_ADVANCE_DAYS", 60) as i64,
        }
    }
}

impl Default for ClinicConfig {
    fn default() -> Self {
        Self {
            clinic_timezone: "Europe/Paris".to_string(),
            open_hour: 8,
            close_hour: 18,
            lunch_start_hour: 12,
            lunch_end_hour: 13,
            slot_duration_minutes: 30,
            max_advance_days: 60,
        }
    }
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} is not a valid number, using default {}", name, default);
            default
        }),
        Err(_) => default,
    }
}
