pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

// Re-export the types collaborators touch most often.
pub use models::{
    ActionAvailability, Appointment, AppointmentAction, AppointmentStatus, BusinessRuleContext,
    UrgencyAssessment, UrgencySeverity, ValidationResult,
};
pub use router::scheduling_routes;
pub use services::{
    ActionValidationService, AppointmentQueryService, CalendarConfig, ClinicCalendar,
    SchedulingRules, TransitionAuthority,
};
