//! Error taxonomy for timetable runs.
//!
//! Configuration and load errors are fatal and surface before allocation
//! begins. Placement shortfalls are *not* errors: they are returned as
//! [`UnmetDemand`](crate::models::UnmetDemand) data alongside the schedule.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by the timetable core.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// The slot catalog has no days or no periods.
    #[error("slot catalog is empty: {0}")]
    EmptySlotCatalog(String),

    /// A day or period label appears more than once in the catalog.
    #[error("duplicate slot label in catalog: {0}")]
    DuplicateSlotLabel(String),

    /// No rooms were supplied.
    #[error("room list is empty")]
    EmptyRoomList,

    /// Weeks in term must be positive.
    #[error("invalid weeks in term: {0} (must be > 0)")]
    InvalidTerm(u32),

    /// Working days per week must be positive.
    #[error("invalid working days per week: {0} (must be > 0)")]
    InvalidWorkingDays(u32),

    /// Input entities failed structural validation.
    #[error("input validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    /// A course has no faculty and none could be resolved from its department.
    #[error("no faculty could be resolved for course '{course}' in department '{department}'")]
    UnresolvedFaculty { course: String, department: String },

    /// A course names a faculty member the dataset does not define.
    #[error("course '{course}' references unknown faculty '{faculty}'")]
    UnknownFaculty { course: String, faculty: String },

    /// A transport section key could not be parsed.
    #[error("invalid section key '{0}': expected '{{department}}_{{batch}}_{{section}}'")]
    InvalidSectionKey(String),

    /// A transport slot key could not be parsed.
    #[error("invalid time slot '{0}': expected '{{Day}} {{Time}}'")]
    InvalidTimeSlot(String),

    /// Unrecognized day label.
    #[error("invalid day '{0}'")]
    InvalidDay(String),

    /// Two transport keys name the same section or slot.
    #[error("duplicate schedule key: {0}")]
    DuplicateScheduleKey(String),

    /// A section already holds a session at this slot.
    #[error("section {section} is already booked at {slot}")]
    SlotOccupied { section: String, slot: String },

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O failure while reading input.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimetableError {
    /// Whether this error stems from configuration rather than input data.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySlotCatalog(_)
                | Self::DuplicateSlotLabel(_)
                | Self::EmptyRoomList
                | Self::InvalidTerm(_)
                | Self::InvalidWorkingDays(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_classification() {
        assert!(TimetableError::EmptyRoomList.is_config_error());
        assert!(TimetableError::InvalidTerm(0).is_config_error());
        assert!(!TimetableError::InvalidSectionKey("x".into()).is_config_error());
        assert!(!TimetableError::Validation(Vec::new()).is_config_error());
    }

    #[test]
    fn test_error_messages() {
        let e = TimetableError::InvalidWorkingDays(0);
        assert_eq!(
            e.to_string(),
            "invalid working days per week: 0 (must be > 0)"
        );
        let e = TimetableError::InvalidSectionKey("CSE_x".into());
        assert!(e.to_string().contains("CSE_x"));
    }
}
