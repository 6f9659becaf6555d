//! Timetable (solution) model.
//!
//! A schedule maps each section to its weekly grid: slot → session.
//! Alongside it, a run reports the sessions it could not place as
//! [`UnmetDemand`] records.
//!
//! # Transport form
//!
//! For export the composite keys are flattened to strings:
//!
//! ```text
//! { "CSE_2022_A": { "Monday 9:00": { "course": "CS101", "faculty": "F1", "room": "R1" } } }
//! ```
//!
//! [`Schedule::to_transport`] and [`Schedule::from_transport`] are exact
//! inverses for identifiers that do not contain the key delimiter.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{SectionKey, TimeSlot};
use crate::error::TimetableError;

/// String-keyed schedule used for transport and persistence.
pub type TransportSchedule = BTreeMap<String, BTreeMap<String, ScheduleEntry>>;

/// One scheduled session: which course meets, taught by whom, where.
///
/// The section and slot are the keys under which the entry is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Course code.
    pub course: String,
    /// Faculty member ID.
    pub faculty: String,
    /// Room ID.
    pub room: String,
}

impl ScheduleEntry {
    /// Creates a new entry.
    pub fn new(
        course: impl Into<String>,
        faculty: impl Into<String>,
        room: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            faculty: faculty.into(),
            room: room.into(),
        }
    }
}

/// A weekly timetable for a set of sections.
///
/// Serializes to the [`TransportSchedule`] shape and deserializes through
/// [`Schedule::from_transport`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TransportSchedule", try_from = "TransportSchedule")]
pub struct Schedule {
    sections: BTreeMap<SectionKey, BTreeMap<TimeSlot, ScheduleEntry>>,
}

/// A session a course needed but the allocator could not place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetDemand {
    /// Course code.
    pub course: String,
    /// Section that is missing sessions.
    pub section: SectionKey,
    /// Sessions short of the weekly target.
    pub missing_sessions: u32,
}

impl UnmetDemand {
    /// Creates a new unmet-demand record.
    pub fn new(course: impl Into<String>, section: SectionKey, missing_sessions: u32) -> Self {
        Self {
            course: course.into(),
            section,
            missing_sessions,
        }
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Books `entry` for `section` at `slot`.
    ///
    /// Fails with [`TimetableError::SlotOccupied`] if the section already
    /// has a session at that slot; an existing booking is never replaced.
    pub fn put(
        &mut self,
        section: SectionKey,
        slot: TimeSlot,
        entry: ScheduleEntry,
    ) -> Result<(), TimetableError> {
        let section_label = section.to_string();
        let grid = self.sections.entry(section).or_default();
        if grid.contains_key(&slot) {
            return Err(TimetableError::SlotOccupied {
                section: section_label,
                slot: slot.to_string(),
            });
        }
        grid.insert(slot, entry);
        Ok(())
    }

    /// Returns the weekly grid of a section.
    pub fn get(&self, section: &SectionKey) -> Option<&BTreeMap<TimeSlot, ScheduleEntry>> {
        self.sections.get(section)
    }

    /// Returns the session of a section at a slot.
    pub fn entry_at(&self, section: &SectionKey, slot: &TimeSlot) -> Option<&ScheduleEntry> {
        self.sections.get(section).and_then(|grid| grid.get(slot))
    }

    /// Sections that have at least one booking, in key order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionKey> {
        self.sections.keys()
    }

    /// All bookings as `(section, slot, entry)`, ordered by section then slot.
    pub fn entries(&self) -> impl Iterator<Item = (&SectionKey, &TimeSlot, &ScheduleEntry)> {
        self.sections
            .iter()
            .flat_map(|(key, grid)| grid.iter().map(move |(slot, entry)| (key, slot, entry)))
    }

    /// Bookings taught by a faculty member.
    pub fn entries_for_faculty<'a>(
        &'a self,
        faculty: &'a str,
    ) -> impl Iterator<Item = (&'a SectionKey, &'a TimeSlot, &'a ScheduleEntry)> {
        self.entries().filter(move |(_, _, e)| e.faculty == faculty)
    }

    /// Bookings held in a room.
    pub fn entries_for_room<'a>(
        &'a self,
        room: &'a str,
    ) -> impl Iterator<Item = (&'a SectionKey, &'a TimeSlot, &'a ScheduleEntry)> {
        self.entries().filter(move |(_, _, e)| e.room == room)
    }

    /// Number of sessions booked for a course in a section.
    pub fn sessions_of(&self, section: &SectionKey, course: &str) -> usize {
        self.sections
            .get(section)
            .map_or(0, |grid| grid.values().filter(|e| e.course == course).count())
    }

    /// Total number of bookings.
    pub fn len(&self) -> usize {
        self.sections.values().map(BTreeMap::len).sum()
    }

    /// Whether nothing is booked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flattens composite keys into their string forms.
    pub fn to_transport(&self) -> TransportSchedule {
        self.sections
            .iter()
            .map(|(key, grid)| {
                let grid = grid
                    .iter()
                    .map(|(slot, entry)| (slot.to_string(), entry.clone()))
                    .collect();
                (key.to_string(), grid)
            })
            .collect()
    }

    /// Rebuilds a schedule from its transport form.
    ///
    /// Fails on the first key that does not parse, and on two spellings of
    /// the same key (`"mon 9:00"` next to `"Monday 9:00"`, or
    /// `"CSE_02022_A"` next to `"CSE_2022_A"`).
    pub fn from_transport(transport: &TransportSchedule) -> Result<Self, TimetableError> {
        let mut sections = BTreeMap::new();
        for (raw_key, grid) in transport {
            let key: SectionKey = raw_key.parse()?;
            let mut parsed = BTreeMap::new();
            for (raw_slot, entry) in grid {
                let slot: TimeSlot = raw_slot.parse()?;
                if parsed.insert(slot, entry.clone()).is_some() {
                    return Err(TimetableError::DuplicateScheduleKey(format!(
                        "{raw_key} / {raw_slot}"
                    )));
                }
            }
            if sections.insert(key, parsed).is_some() {
                return Err(TimetableError::DuplicateScheduleKey(raw_key.clone()));
            }
        }
        Ok(Self { sections })
    }
}

impl From<Schedule> for TransportSchedule {
    fn from(schedule: Schedule) -> Self {
        schedule.to_transport()
    }
}

impl TryFrom<TransportSchedule> for Schedule {
    type Error = TimetableError;

    fn try_from(transport: TransportSchedule) -> Result<Self, Self::Error> {
        Self::from_transport(&transport)
    }
}
