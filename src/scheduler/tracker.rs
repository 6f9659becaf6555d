//! Conflict tracker: per-run occupancy and session counters.
//!
//! Faculty and rooms are tracked as independent resource dimensions,
//! each mapping an identifier to the set of slots it is busy in.
//! Sections get the same treatment so a cohort never sits two sessions
//! at once. Per-(course, section) weekly and per-day counters bound
//! demand.
//!
//! The tracker is created empty for each run, mutated only through
//! [`ConflictTracker::commit`], and handed back with the outcome.

use std::collections::{HashMap, HashSet};

use crate::models::{Day, SectionKey, TimeSlot};

type CourseSection = (String, SectionKey);

/// Occupancy sets and demand counters for one allocation run.
#[derive(Debug, Clone, Default)]
pub struct ConflictTracker {
    faculty_busy: HashMap<String, HashSet<TimeSlot>>,
    room_busy: HashMap<String, HashSet<TimeSlot>>,
    section_busy: HashMap<SectionKey, HashSet<TimeSlot>>,
    weekly: HashMap<CourseSection, u32>,
    daily: HashMap<CourseSection, HashMap<Day, u32>>,
}

impl ConflictTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the faculty member is free at `slot`.
    pub fn is_faculty_free(&self, faculty: &str, slot: &TimeSlot) -> bool {
        !self
            .faculty_busy
            .get(faculty)
            .is_some_and(|slots| slots.contains(slot))
    }

    /// Whether the room is free at `slot`.
    pub fn is_room_free(&self, room: &str, slot: &TimeSlot) -> bool {
        !self
            .room_busy
            .get(room)
            .is_some_and(|slots| slots.contains(slot))
    }

    /// Whether the section has nothing booked at `slot`.
    pub fn is_section_free(&self, section: &SectionKey, slot: &TimeSlot) -> bool {
        !self
            .section_busy
            .get(section)
            .is_some_and(|slots| slots.contains(slot))
    }

    /// Sessions of `course` placed for `section` this week.
    pub fn weekly_count(&self, course: &str, section: &SectionKey) -> u32 {
        self.weekly
            .get(&(course.to_string(), section.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Sessions of `course` placed for `section` on `day`.
    pub fn daily_count(&self, course: &str, section: &SectionKey, day: Day) -> u32 {
        self.daily
            .get(&(course.to_string(), section.clone()))
            .and_then(|per_day| per_day.get(&day))
            .copied()
            .unwrap_or(0)
    }

    /// Slots occupied by a faculty member.
    pub fn faculty_slots(&self, faculty: &str) -> usize {
        self.faculty_busy.get(faculty).map_or(0, HashSet::len)
    }

    /// Slots occupied by a room.
    pub fn room_slots(&self, room: &str) -> usize {
        self.room_busy.get(room).map_or(0, HashSet::len)
    }

    /// Records a placed session across every dimension at once.
    ///
    /// Returns `false` without changing anything if the faculty member,
    /// room or section is already busy at `slot`.
    pub fn commit(
        &mut self,
        course: &str,
        section: &SectionKey,
        faculty: &str,
        room: &str,
        slot: &TimeSlot,
    ) -> bool {
        if !self.is_faculty_free(faculty, slot)
            || !self.is_room_free(room, slot)
            || !self.is_section_free(section, slot)
        {
            return false;
        }

        self.faculty_busy
            .entry(faculty.to_string())
            .or_default()
            .insert(slot.clone());
        self.room_busy
            .entry(room.to_string())
            .or_default()
            .insert(slot.clone());
        self.section_busy
            .entry(section.clone())
            .or_default()
            .insert(slot.clone());

        let key = (course.to_string(), section.clone());
        *self.weekly.entry(key.clone()).or_insert(0) += 1;
        *self
            .daily
            .entry(key)
            .or_default()
            .entry(slot.day)
            .or_insert(0) += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(label: &str) -> SectionKey {
        SectionKey::new("CSE", 2022, label)
    }

    fn mon(time: &str) -> TimeSlot {
        TimeSlot::new(Day::Monday, time)
    }

    #[test]
    fn test_empty_tracker_is_free() {
        let t = ConflictTracker::new();
        assert!(t.is_faculty_free("F1", &mon("9:00")));
        assert!(t.is_room_free("R1", &mon("9:00")));
        assert!(t.is_section_free(&section("A"), &mon("9:00")));
        assert_eq!(t.weekly_count("CS101", &section("A")), 0);
        assert_eq!(t.daily_count("CS101", &section("A"), Day::Monday), 0);
    }

    #[test]
    fn test_commit_marks_all_dimensions() {
        let mut t = ConflictTracker::new();
        assert!(t.commit("CS101", &section("A"), "F1", "R1", &mon("9:00")));

        assert!(!t.is_faculty_free("F1", &mon("9:00")));
        assert!(!t.is_room_free("R1", &mon("9:00")));
        assert!(!t.is_section_free(&section("A"), &mon("9:00")));

        // Other slots and other resources remain free
        assert!(t.is_faculty_free("F1", &mon("10:00")));
        assert!(t.is_faculty_free("F2", &mon("9:00")));
        assert!(t.is_room_free("R2", &mon("9:00")));
        assert!(t.is_section_free(&section("B"), &mon("9:00")));

        assert_eq!(t.weekly_count("CS101", &section("A")), 1);
        assert_eq!(t.daily_count("CS101", &section("A"), Day::Monday), 1);
        assert_eq!(t.daily_count("CS101", &section("A"), Day::Tuesday), 0);
        assert_eq!(t.faculty_slots("F1"), 1);
        assert_eq!(t.room_slots("R1"), 1);
    }

    #[test]
    fn test_commit_rejects_conflicts() {
        let mut t = ConflictTracker::new();
        assert!(t.commit("CS101", &section("A"), "F1", "R1", &mon("9:00")));

        // Same faculty, different room and section
        assert!(!t.commit("CS102", &section("B"), "F1", "R2", &mon("9:00")));
        // Same room
        assert!(!t.commit("CS102", &section("B"), "F2", "R1", &mon("9:00")));
        // Same section
        assert!(!t.commit("CS102", &section("A"), "F2", "R2", &mon("9:00")));

        // Rejected commits leave counters untouched
        assert_eq!(t.weekly_count("CS102", &section("B")), 0);
        assert_eq!(t.faculty_slots("F2"), 0);
    }

    #[test]
    fn test_counters_accumulate() {
        let mut t = ConflictTracker::new();
        t.commit("CS101", &section("A"), "F1", "R1", &mon("9:00"));
        t.commit("CS101", &section("A"), "F1", "R1", &mon("10:00"));
        t.commit(
            "CS101",
            &section("A"),
            "F1",
            "R1",
            &TimeSlot::new(Day::Friday, "9:00"),
        );

        assert_eq!(t.weekly_count("CS101", &section("A")), 3);
        assert_eq!(t.daily_count("CS101", &section("A"), Day::Monday), 2);
        assert_eq!(t.daily_count("CS101", &section("A"), Day::Friday), 1);
        // Counters are per section
        assert_eq!(t.weekly_count("CS101", &section("B")), 0);
    }
}
