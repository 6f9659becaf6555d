//! Input validation and schedule verification.
//!
//! [`validate_input`] is the load-time gate: it checks the structural
//! integrity of courses, rooms and sections before a run starts and
//! reports every problem at once. Detects:
//! - Duplicate IDs (rooms, course codes within a department, section keys)
//! - Empty identifiers, and identifiers containing the section-key delimiter
//! - Courses without a faculty reference
//! - Rooms with zero capacity
//!
//! [`verify_schedule`] checks a finished schedule against the timetable
//! invariants: no faculty or room double-booking, the assigned faculty
//! teaches each session, room type and capacity compliance, and
//! weekly/daily demand bounds.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::demand::DemandCalculator;
use crate::models::{is_key_component, Course, Day, Room, Schedule, Section, SectionKey, TimeSlot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// An identifier is empty or contains the key delimiter.
    InvalidIdentifier,
    /// A course has no faculty reference.
    MissingFaculty,
    /// A room cannot seat anyone.
    ZeroCapacity,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input entities of an allocation run.
///
/// Checks:
/// 1. No duplicate room IDs
/// 2. No duplicate course codes within a department
/// 3. No duplicate section keys
/// 4. Department codes and section labels are non-empty and free of `_`
/// 5. Room IDs and course codes are non-empty
/// 6. Every course names a faculty member
/// 7. Every room seats at least one student
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(courses: &[Course], rooms: &[Room], sections: &[Section]) -> ValidationResult {
    let mut errors = Vec::new();

    let mut room_ids = HashSet::new();
    for r in rooms {
        if r.id.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidIdentifier,
                "Room with empty ID",
            ));
        }
        if !room_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate room ID: {}", r.id),
            ));
        }
        if r.capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroCapacity,
                format!("Room '{}' has zero capacity", r.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    for c in courses {
        if c.code.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidIdentifier,
                format!("Course with empty code in department '{}'", c.department),
            ));
        }
        if !is_key_component(&c.department) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidIdentifier,
                format!(
                    "Course '{}' has invalid department code '{}'",
                    c.code, c.department
                ),
            ));
        }
        if !course_ids.insert((c.department.as_str(), c.code.as_str())) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course code: {} in {}", c.code, c.department),
            ));
        }
        if c.faculty.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingFaculty,
                format!("Course '{}' has no faculty assigned", c.code),
            ));
        }
    }

    let mut section_keys = HashSet::new();
    for s in sections {
        let key = s.key();
        if !key.is_encodable() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidIdentifier,
                format!(
                    "Section ({}, {}, {}) has an empty or '_'-containing identifier",
                    s.department, s.batch, s.label
                ),
            ));
        }
        if !section_keys.insert(key) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate section: {}", s.key()),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A broken timetable invariant found by [`verify_schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Related entity ID (faculty, room, section or course).
    pub entity_id: String,
    /// Human-readable description.
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// A faculty member teaches two sessions in one slot.
    FacultyDoubleBooked,
    /// A room hosts two sessions in one slot.
    RoomDoubleBooked,
    /// The room seats fewer students than the section has.
    CapacityExceeded,
    /// Lab course in a classroom or vice versa.
    RoomTypeMismatch,
    /// More weekly sessions than the course's weekly limit.
    WeeklyLimitExceeded,
    /// More sessions on one day than the course's daily limit.
    DailyLimitExceeded,
    /// Entry refers to a course, room or section that does not exist.
    UnknownReference,
    /// Entry names a teacher other than the course's assigned faculty.
    FacultyMismatch,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        entity_id: impl Into<String>,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            entity_id: entity_id.into(),
            message: message.into(),
            severity,
        }
    }
}

/// Checks a schedule against the timetable invariants.
///
/// Section double-booking is impossible by construction (one entry per
/// section and slot) and is not re-checked.
///
/// # Returns
/// All violations found, in schedule order. Empty means valid.
pub fn verify_schedule(
    schedule: &Schedule,
    courses: &[Course],
    rooms: &[Room],
    sections: &[Section],
    demand: &DemandCalculator,
) -> Vec<Violation> {
    let mut violations = Vec::new();

    let course_map: HashMap<(&str, &str), &Course> = courses
        .iter()
        .map(|c| ((c.department.as_str(), c.code.as_str()), c))
        .collect();
    let room_map: HashMap<&str, &Room> = rooms.iter().map(|r| (r.id.as_str(), r)).collect();
    let section_map: HashMap<SectionKey, &Section> = sections.iter().map(|s| (s.key(), s)).collect();

    let mut faculty_seen: HashMap<(&str, &TimeSlot), &SectionKey> = HashMap::new();
    let mut room_seen: HashMap<(&str, &TimeSlot), &SectionKey> = HashMap::new();
    let mut weekly: HashMap<(&SectionKey, &str), u32> = HashMap::new();
    let mut daily: HashMap<(&SectionKey, &str, Day), u32> = HashMap::new();

    for (key, slot, entry) in schedule.entries() {
        if let Some(other) = faculty_seen.insert((entry.faculty.as_str(), slot), key) {
            violations.push(Violation::new(
                ViolationType::FacultyDoubleBooked,
                &entry.faculty,
                format!("Faculty '{}' booked for {other} and {key} at {slot}", entry.faculty),
                95,
            ));
        }
        if let Some(other) = room_seen.insert((entry.room.as_str(), slot), key) {
            violations.push(Violation::new(
                ViolationType::RoomDoubleBooked,
                &entry.room,
                format!("Room '{}' booked for {other} and {key} at {slot}", entry.room),
                95,
            ));
        }

        *weekly.entry((key, entry.course.as_str())).or_insert(0) += 1;
        *daily.entry((key, entry.course.as_str(), slot.day)).or_insert(0) += 1;

        let course = course_map.get(&(key.department.as_str(), entry.course.as_str()));
        let room = room_map.get(entry.room.as_str());
        let section = section_map.get(key);
        let (Some(course), Some(room), Some(section)) = (course, room, section) else {
            violations.push(Violation::new(
                ViolationType::UnknownReference,
                key.to_string(),
                format!(
                    "Entry at {slot} for {key} references unknown course, room or section ({} / {})",
                    entry.course, entry.room
                ),
                100,
            ));
            continue;
        };

        if entry.faculty != course.faculty {
            violations.push(Violation::new(
                ViolationType::FacultyMismatch,
                &entry.faculty,
                format!(
                    "Course '{}' in {key} at {slot} is taught by '{}', expected '{}'",
                    course.code, entry.faculty, course.faculty
                ),
                80,
            ));
        }
        if room.capacity < section.strength {
            violations.push(Violation::new(
                ViolationType::CapacityExceeded,
                &room.id,
                format!(
                    "Room '{}' seats {} but section {key} has {}",
                    room.id, room.capacity, section.strength
                ),
                90,
            ));
        }
        if !room.matches_type(course) {
            violations.push(Violation::new(
                ViolationType::RoomTypeMismatch,
                &room.id,
                format!(
                    "Course '{}' (lab: {}) placed in {:?} '{}'",
                    course.code, course.requires_lab, room.room_type, room.id
                ),
                90,
            ));
        }
    }

    let mut weekly: Vec<_> = weekly.into_iter().collect();
    weekly.sort();
    for ((key, code), count) in weekly {
        if let Some(course) = course_map.get(&(key.department.as_str(), code)) {
            let limit = demand.weekly_limit(course.total_hours);
            if count > limit {
                violations.push(Violation::new(
                    ViolationType::WeeklyLimitExceeded,
                    code,
                    format!("Course '{code}' has {count} weekly sessions in {key} (limit {limit})"),
                    70,
                ));
            }
        }
    }

    let mut daily: Vec<_> = daily.into_iter().collect();
    daily.sort();
    for ((key, code, day), count) in daily {
        if let Some(course) = course_map.get(&(key.department.as_str(), code)) {
            let limit = demand.daily_limit(course.total_hours);
            if count > limit {
                violations.push(Violation::new(
                    ViolationType::DailyLimitExceeded,
                    code,
                    format!("Course '{code}' has {count} sessions on {day} in {key} (limit {limit})"),
                    70,
                ));
            }
        }
    }

    violations
}
