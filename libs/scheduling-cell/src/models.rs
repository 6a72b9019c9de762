// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// Read-only appointment snapshot supplied by the caller.
///
/// The rule engine never creates, persists or mutates appointments; it only
/// evaluates this snapshot against the clinic's scheduling rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: AppointmentStatus,
    /// Last edit time, used for the check-in cooldown. Optional because
    /// freshly created rows may not carry it.
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    CheckedIn,
    Completed,
    Cancelled,
    NoShow,
    Rescheduled,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 7] = [
        AppointmentStatus::Scheduled,
        AppointmentStatus::Confirmed,
        AppointmentStatus::CheckedIn,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
        AppointmentStatus::Rescheduled,
    ];
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "scheduled"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::CheckedIn => write!(f, "checked_in"),
            AppointmentStatus::Completed => write!(f, "completed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::NoShow => write!(f, "no_show"),
            AppointmentStatus::Rescheduled => write!(f, "rescheduled"),
        }
    }
}

// ==============================================================================
// EVALUATION CONTEXT AND RESULTS
// ==============================================================================

/// Per-call evaluation context constructed by the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BusinessRuleContext {
    /// Evaluation instant; the HTTP boundary defaults it to now.
    #[serde(default)]
    pub current_time: Option<DateTime<Utc>>,
    /// Administrative bypass of timing-window checks. Never bypasses the
    /// status precondition.
    #[serde(default)]
    pub allow_override: bool,
    /// Informational only; roles are enforced upstream.
    #[serde(default)]
    pub user_role: Option<String>,
}

impl BusinessRuleContext {
    pub fn with_override() -> Self {
        Self {
            allow_override: true,
            ..Default::default()
        }
    }
}

/// Pass/fail verdict with a user-facing reason on failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: Some(reason.into()),
        }
    }
}

// ==============================================================================
// ACTIONS AND AGGREGATE QUERY MODELS
// ==============================================================================

/// User-facing actions governed by the rule engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentAction {
    CheckIn,
    Complete,
    Cancel,
    NoShow,
    Reschedule,
    ViewHistory,
}

impl AppointmentAction {
    pub const ALL: [AppointmentAction; 6] = [
        AppointmentAction::CheckIn,
        AppointmentAction::Complete,
        AppointmentAction::Cancel,
        AppointmentAction::NoShow,
        AppointmentAction::Reschedule,
        AppointmentAction::ViewHistory,
    ];

    /// The status an appointment moves to when this action is performed.
    /// `ViewHistory` is read-only and moves nothing.
    pub fn target_status(&self) -> Option<AppointmentStatus> {
        match self {
            AppointmentAction::CheckIn => Some(AppointmentStatus::CheckedIn),
            AppointmentAction::Complete => Some(AppointmentStatus::Completed),
            AppointmentAction::Cancel => Some(AppointmentStatus::Cancelled),
            AppointmentAction::NoShow => Some(AppointmentStatus::NoShow),
            AppointmentAction::Reschedule => Some(AppointmentStatus::Rescheduled),
            AppointmentAction::ViewHistory => None,
        }
    }
}

impl fmt::Display for AppointmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentAction::CheckIn => write!(f, "check_in"),
            AppointmentAction::Complete => write!(f, "complete"),
            AppointmentAction::Cancel => write!(f, "cancel"),
            AppointmentAction::NoShow => write!(f, "no_show"),
            AppointmentAction::Reschedule => write!(f, "reschedule"),
            AppointmentAction::ViewHistory => write!(f, "view_history"),
        }
    }
}

impl FromStr for AppointmentAction {
    type Err = SchedulingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "check_in" => Ok(AppointmentAction::CheckIn),
            "complete" => Ok(AppointmentAction::Complete),
            "cancel" => Ok(AppointmentAction::Cancel),
            "no_show" => Ok(AppointmentAction::NoShow),
            "reschedule" => Ok(AppointmentAction::Reschedule),
            "view_history" => Ok(AppointmentAction::ViewHistory),
            other => Err(SchedulingError::UnknownAction(other.to_string())),
        }
    }
}

/// One entry in the availability list rendered by the UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionAvailability {
    pub action: AppointmentAction,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum UrgencySeverity {
    Low,
    Medium,
    High,
}

/// Dashboard highlighting heuristic, not an authoritative state change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrgencyAssessment {
    pub urgent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<UrgencySeverity>,
}

impl UrgencyAssessment {
    pub fn none() -> Self {
        Self {
            urgent: false,
            reason: None,
            severity: None,
        }
    }

    pub fn flag(reason: impl Into<String>, severity: UrgencySeverity) -> Self {
        Self {
            urgent: true,
            reason: Some(reason.into()),
            severity: Some(severity),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateActionRequest {
    pub appointment: Appointment,
    #[serde(default)]
    pub context: Option<BusinessRuleContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionRequest {
    pub from: AppointmentStatus,
    pub to: AppointmentStatus,
    #[serde(default)]
    pub context: Option<BusinessRuleContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescheduleSlotRequest {
    pub proposed_time: DateTime<Utc>,
    #[serde(default)]
    pub context: Option<BusinessRuleContext>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum SchedulingError {
    #[error("Unknown appointment action: {0}")]
    UnknownAction(String),

    #[error("Invalid clinic timezone: {0}")]
    InvalidTimezone(String),
}
