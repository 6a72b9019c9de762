pub mod calendar;
pub mod queries;
pub mod rules;
pub mod transitions;
pub mod validators;

pub use calendar::{CalendarConfig, ClinicCalendar};
pub use queries::AppointmentQueryService;
pub use rules::SchedulingRules;
pub use transitions::TransitionAuthority;
pub use validators::ActionValidationService;
