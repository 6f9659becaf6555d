//! Room model.
//!
//! Rooms are the shared physical resource of a timetable. Capacity and
//! room type are hard constraints; facilities and building are carried
//! for reporting.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Course, Section};

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Unique room identifier.
    pub id: String,
    /// Human-readable name (e.g. room number).
    #[serde(default)]
    pub name: String,
    /// Seats available.
    pub capacity: u32,
    /// Room classification.
    pub room_type: RoomType,
    /// Installed facilities (projector, computers, ...).
    #[serde(default)]
    pub facilities: BTreeSet<String>,
    /// Building the room belongs to.
    #[serde(default)]
    pub building: String,
}

/// Room type classification.
///
/// Lab courses go to labs, everything else to classrooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    /// Lecture room.
    Classroom,
    /// Laboratory.
    Lab,
}

impl Room {
    /// Creates a new room.
    pub fn new(id: impl Into<String>, room_type: RoomType, capacity: u32) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            capacity,
            room_type,
            facilities: BTreeSet::new(),
            building: String::new(),
        }
    }

    /// Creates a classroom.
    pub fn classroom(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomType::Classroom, capacity)
    }

    /// Creates a lab.
    pub fn lab(id: impl Into<String>, capacity: u32) -> Self {
        Self::new(id, RoomType::Lab, capacity)
    }

    /// Sets the room name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a facility.
    pub fn with_facility(mut self, facility: impl Into<String>) -> Self {
        self.facilities.insert(facility.into());
        self
    }

    /// Sets the building.
    pub fn with_building(mut self, building: impl Into<String>) -> Self {
        self.building = building.into();
        self
    }

    /// Whether this room has the given facility.
    pub fn has_facility(&self, facility: &str) -> bool {
        self.facilities.contains(facility)
    }

    /// Whether the room type matches the course's lab requirement.
    #[inline]
    pub fn matches_type(&self, course: &Course) -> bool {
        match self.room_type {
            RoomType::Lab => course.requires_lab,
            RoomType::Classroom => !course.requires_lab,
        }
    }

    /// Whether the room can host `course` for `section`: type matches and
    /// capacity covers the section's headcount.
    #[inline]
    pub fn suits(&self, course: &Course, section: &Section) -> bool {
        self.capacity >= section.strength && self.matches_type(course)
    }
}
