//! Dataset ingestion.
//!
//! Reads the department-structured JSON produced by the institution's
//! data export and turns it into an [`AllocationRequest`]:
//!
//! ```text
//! {
//!   "rooms": [{ "id", "name", "capacity", "room_type", "facilities", "building" }],
//!   "departments": {
//!     "CSE": {
//!       "faculty":  [{ "id", "name", "specializations", "max_hours_per_day" }],
//!       "subjects": [{ "code", "name", "semester", "credits", "requires_lab",
//!                      "preferred_faculty_specializations", "total_hours" }],
//!       "sections": { "<id>": { "batch", "section", "strength" } }
//!     }
//!   },
//!   "time_slots": { "days": [...], "times": [...] }
//! }
//! ```
//!
//! Departments and sections are visited in key order.
//!
//! # Faculty resolution
//!
//! Each subject gets exactly one teacher, chosen in this order:
//! 1. an explicit `faculty` field;
//! 2. the first ID listed in `preferred_faculty_specializations`;
//! 3. the first department member whose specializations include the
//!    subject code;
//! 4. the first department member.
//!
//! A subject with no candidate at all fails the load.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::TimetableConfig;
use crate::error::TimetableError;
use crate::models::{Course, Day, Faculty, Room, Section};
use crate::scheduler::AllocationRequest;

/// Top-level dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// All rooms, in tie-break order.
    pub rooms: Vec<Room>,
    /// Departments keyed by code.
    pub departments: BTreeMap<String, DepartmentRecord>,
    /// Optional catalog override.
    #[serde(default)]
    pub time_slots: Option<TimeSlotsRecord>,
}

/// One department's faculty, subjects and sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DepartmentRecord {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Faculty members, in resolution order.
    #[serde(default)]
    pub faculty: Vec<Faculty>,
    /// Subjects (courses) taught by the department.
    #[serde(default)]
    pub subjects: Vec<SubjectRecord>,
    /// Sections keyed by an opaque section ID.
    #[serde(default)]
    pub sections: BTreeMap<String, SectionRecord>,
}

/// A subject as exported.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubjectRecord {
    /// Subject code.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Semester.
    #[serde(default)]
    pub semester: u32,
    /// Credit weight.
    #[serde(default)]
    pub credits: u32,
    /// Lab-only flag.
    #[serde(default)]
    pub requires_lab: bool,
    /// Faculty IDs mapped to this subject, most preferred first.
    #[serde(default)]
    pub preferred_faculty_specializations: Vec<String>,
    /// Explicit teacher, overriding every other rule.
    #[serde(default)]
    pub faculty: Option<String>,
    /// Total instructional hours.
    #[serde(default)]
    pub total_hours: u32,
}

/// A section as exported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    /// Batch (admission year).
    pub batch: u32,
    /// Section label.
    pub section: String,
    /// Enrolled headcount.
    #[serde(default)]
    pub strength: u32,
}

/// Catalog override carried by the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeSlotsRecord {
    /// Day labels (names, abbreviations or `1`..`5`); duplicates collapse.
    #[serde(default)]
    pub days: Vec<String>,
    /// Period labels; duplicates collapse.
    #[serde(default)]
    pub times: Vec<String>,
}

impl Dataset {
    /// Parses a dataset from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, TimetableError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a dataset file.
    pub fn from_path(path: &Path) -> Result<Self, TimetableError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// All faculty across departments, in department then declaration order.
    pub fn faculty(&self) -> impl Iterator<Item = &Faculty> {
        self.departments.values().flat_map(|d| d.faculty.iter())
    }

    /// Builds the allocation input, resolving one teacher per subject.
    pub fn to_request(&self) -> Result<AllocationRequest, TimetableError> {
        let known_faculty: HashSet<&str> = self.faculty().map(|f| f.id.as_str()).collect();
        let mut courses = Vec::new();
        let mut sections = Vec::new();

        for (code, dept) in &self.departments {
            for subject in &dept.subjects {
                let faculty = resolve_faculty(code, dept, subject)?;
                if !known_faculty.contains(faculty.as_str()) {
                    return Err(TimetableError::UnknownFaculty {
                        course: subject.code.clone(),
                        faculty,
                    });
                }
                debug!(department = %code, course = %subject.code, %faculty, "resolved faculty");
                courses.push(
                    Course::new(&subject.code, code)
                        .with_name(&subject.name)
                        .with_semester(subject.semester)
                        .with_credits(subject.credits)
                        .with_lab(subject.requires_lab)
                        .with_faculty(faculty)
                        .with_total_hours(subject.total_hours),
                );
            }
            for record in dept.sections.values() {
                sections.push(
                    Section::new(code, record.batch, &record.section).with_strength(record.strength),
                );
            }
        }

        Ok(AllocationRequest::new(courses, self.rooms.clone(), sections))
    }

    /// Applies the dataset's catalog override, if any, to `config`.
    ///
    /// Non-empty day or period lists replace the configured ones; an
    /// absent or empty list leaves the configuration untouched.
    pub fn apply_catalog(&self, mut config: TimetableConfig) -> Result<TimetableConfig, TimetableError> {
        let Some(slots) = &self.time_slots else {
            return Ok(config);
        };

        if !slots.days.is_empty() {
            let mut days: Vec<Day> = Vec::new();
            for label in &slots.days {
                let day: Day = label.parse()?;
                if !days.contains(&day) {
                    days.push(day);
                }
            }
            config.days = days;
        }

        if !slots.times.is_empty() {
            let mut times: Vec<String> = Vec::new();
            for time in &slots.times {
                if !times.contains(time) {
                    times.push(time.clone());
                }
            }
            config.times = times;
        }

        Ok(config)
    }
}

fn resolve_faculty(
    department: &str,
    dept: &DepartmentRecord,
    subject: &SubjectRecord,
) -> Result<String, TimetableError> {
    if let Some(explicit) = subject.faculty.as_deref().filter(|f| !f.is_empty()) {
        return Ok(explicit.to_string());
    }
    if let Some(preferred) = subject
        .preferred_faculty_specializations
        .iter()
        .find(|f| !f.is_empty())
    {
        return Ok(preferred.clone());
    }
    dept.faculty
        .iter()
        .find(|f| f.teaches(&subject.code))
        .or_else(|| dept.faculty.first())
        .map(|f| f.id.clone())
        .ok_or_else(|| TimetableError::UnresolvedFaculty {
            course: subject.code.clone(),
            department: department.to_string(),
        })
}
