//! Greedy single-pass timetable allocator.
//!
//! # Algorithm
//!
//! 1. For each section, in input order:
//! 2. For each course of the section's department, in input order:
//! 3. Walk the slot catalog (freshly shuffled per course, or in catalog
//!    order) until the course's weekly demand is met. A slot is taken when
//!    - the course's daily cap for that day is not yet reached,
//!    - the faculty member and the section are both free, and
//!    - some free room has the right type and enough seats.
//! 4. Whatever is still missing after the walk is reported as
//!    [`UnmetDemand`]; the run continues with the next course.
//!
//! Committed sessions are never revoked. Which courses win when the
//! instance is over-constrained therefore depends on section order,
//! course order, the shuffle seed and room declaration order.
//!
//! # Complexity
//! O(s * c * t * r) where s=sections, c=courses/department, t=slots, r=rooms.
//!
//! # Reference
//! Schaerf (1999), "A Survey of Automated Timetabling", §3 (class-teacher
//! timetabling, direct heuristics)

use std::collections::HashMap;

use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::ConflictTracker;
use crate::catalog::SlotCatalog;
use crate::config::TimetableConfig;
use crate::demand::{DemandCalculator, DemandLimits};
use crate::error::TimetableError;
use crate::models::{Course, Room, Schedule, ScheduleEntry, Section, TimeSlot, UnmetDemand};
use crate::validation::validate_input;

/// Which room wins when several fit a slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomSelection {
    /// First suitable room in declaration order.
    #[default]
    FirstFit,
    /// Suitable room with the smallest capacity; ties go to declaration order.
    BestFit,
}

/// Order in which candidate slots are visited for each course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotOrder {
    /// Seeded permutation, redrawn for every (section, course).
    #[default]
    Shuffled,
    /// Catalog order (day-major).
    Sequential,
}

/// Input container for one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Courses, grouped implicitly by department.
    pub courses: Vec<Course>,
    /// Rooms, in tie-break order.
    pub rooms: Vec<Room>,
    /// Sections, in processing order.
    pub sections: Vec<Section>,
}

impl AllocationRequest {
    /// Creates a new request.
    pub fn new(courses: Vec<Course>, rooms: Vec<Room>, sections: Vec<Section>) -> Self {
        Self {
            courses,
            rooms,
            sections,
        }
    }

    /// Adds a course.
    pub fn with_course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// Adds a room.
    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Courses of a department, in input order.
    pub fn courses_of<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a Course> {
        self.courses.iter().filter(move |c| c.department == department)
    }
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// Placed sessions.
    pub schedule: Schedule,
    /// Sessions that could not be placed, in discovery order.
    pub unmet: Vec<UnmetDemand>,
    /// Final occupancy state.
    pub tracker: ConflictTracker,
}

impl AllocationOutcome {
    /// Whether every course reached its weekly demand.
    pub fn is_complete(&self) -> bool {
        self.unmet.is_empty()
    }

    /// Total sessions short across all courses and sections.
    pub fn missing_sessions(&self) -> u32 {
        self.unmet.iter().map(|u| u.missing_sessions).sum()
    }

    /// Serializable `{schedule, unmet}` view for export.
    pub fn report(&self) -> AllocationReport {
        AllocationReport {
            schedule: self.schedule.clone(),
            unmet: self.unmet.clone(),
        }
    }
}

/// Exported form of a run: string-keyed schedule plus unmet demand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Placed sessions.
    pub schedule: Schedule,
    /// Unplaced sessions.
    #[serde(default)]
    pub unmet: Vec<UnmetDemand>,
}

/// Greedy timetable allocator.
///
/// # Example
///
/// ```
/// use u_timetable::config::TimetableConfig;
/// use u_timetable::models::{Course, Room, Section};
/// use u_timetable::scheduler::{AllocationRequest, Allocator};
///
/// let request = AllocationRequest::new(
///     vec![Course::new("CS101", "CSE").with_faculty("F1").with_total_hours(48)],
///     vec![Room::classroom("R1", 40)],
///     vec![Section::new("CSE", 2022, "A").with_strength(30)],
/// );
/// let allocator = Allocator::new(TimetableConfig::default().with_seed(1)).unwrap();
/// let outcome = allocator.allocate(&request).unwrap();
/// assert_eq!(outcome.schedule.len(), 4);
/// assert!(outcome.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct Allocator {
    catalog: SlotCatalog,
    demand: DemandCalculator,
    seed: u64,
    room_selection: RoomSelection,
    slot_order: SlotOrder,
}

impl Allocator {
    /// Creates an allocator from configuration.
    ///
    /// Fails on an empty slot catalog or a non-positive term length.
    pub fn new(config: TimetableConfig) -> Result<Self, TimetableError> {
        Ok(Self {
            catalog: config.catalog()?,
            demand: config.demand()?,
            seed: config.seed,
            room_selection: config.room_selection,
            slot_order: config.slot_order,
        })
    }

    /// Creates an allocator from pre-built parts.
    pub fn from_parts(catalog: SlotCatalog, demand: DemandCalculator, seed: u64) -> Self {
        Self {
            catalog,
            demand,
            seed,
            room_selection: RoomSelection::default(),
            slot_order: SlotOrder::default(),
        }
    }

    /// Sets the room tie-break policy.
    pub fn with_room_selection(mut self, selection: RoomSelection) -> Self {
        self.room_selection = selection;
        self
    }

    /// Sets the slot visiting order.
    pub fn with_slot_order(mut self, order: SlotOrder) -> Self {
        self.slot_order = order;
        self
    }

    /// The slot catalog in use.
    pub fn catalog(&self) -> &SlotCatalog {
        &self.catalog
    }

    /// The demand calculator in use.
    pub fn demand(&self) -> &DemandCalculator {
        &self.demand
    }

    /// Runs one allocation.
    ///
    /// Validates the request first; any configuration or load error aborts
    /// before a single session is placed. Placement shortfalls are returned
    /// in [`AllocationOutcome::unmet`], never as errors.
    pub fn allocate(&self, request: &AllocationRequest) -> Result<AllocationOutcome, TimetableError> {
        self.allocate_with(request, ConflictTracker::new())
    }

    /// Runs one allocation on top of existing occupancy.
    ///
    /// Slots already held by a faculty member, room or section in
    /// `tracker` are treated as unavailable. The tracker is handed back,
    /// updated, in the outcome.
    pub fn allocate_with(
        &self,
        request: &AllocationRequest,
        mut tracker: ConflictTracker,
    ) -> Result<AllocationOutcome, TimetableError> {
        if request.rooms.is_empty() {
            return Err(TimetableError::EmptyRoomList);
        }
        validate_input(&request.courses, &request.rooms, &request.sections)
            .map_err(TimetableError::Validation)?;

        info!(
            sections = request.sections.len(),
            courses = request.courses.len(),
            rooms = request.rooms.len(),
            slots = self.catalog.len(),
            seed = self.seed,
            "starting timetable allocation"
        );

        let limits: HashMap<(&str, &str), DemandLimits> = request
            .courses
            .iter()
            .map(|c| ((c.department.as_str(), c.code.as_str()), self.demand.limits(c)))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut schedule = Schedule::new();
        let mut unmet = Vec::new();

        for section in &request.sections {
            let key = section.key();

            for course in request.courses_of(&section.department) {
                let DemandLimits { weekly, daily } =
                    limits[&(course.department.as_str(), course.code.as_str())];

                let slots = match self.slot_order {
                    SlotOrder::Shuffled => self.catalog.shuffled_with(&mut rng),
                    SlotOrder::Sequential => self.catalog.slots().to_vec(),
                };

                // Sessions already held in a caller-supplied tracker count
                // toward the weekly target.
                let mut placed = tracker.weekly_count(&course.code, &key);
                for slot in slots {
                    if placed >= weekly {
                        break;
                    }
                    if tracker.daily_count(&course.code, &key, slot.day) >= daily {
                        continue;
                    }
                    if !tracker.is_faculty_free(&course.faculty, &slot)
                        || !tracker.is_section_free(&key, &slot)
                    {
                        continue;
                    }
                    let Some(room) = self.select_room(&request.rooms, &tracker, course, section, &slot)
                    else {
                        continue;
                    };

                    if !tracker.commit(&course.code, &key, &course.faculty, &room.id, &slot) {
                        continue;
                    }
                    schedule.put(
                        key.clone(),
                        slot.clone(),
                        ScheduleEntry::new(&course.code, &course.faculty, &room.id),
                    )?;
                    debug!(
                        course = %course.code,
                        section = %key,
                        slot = %slot,
                        room = %room.id,
                        "placed session"
                    );
                    placed += 1;
                }

                if placed < weekly {
                    let missing = weekly - placed;
                    warn!(
                        course = %course.code,
                        section = %key,
                        placed,
                        required = weekly,
                        "could not place all weekly sessions"
                    );
                    unmet.push(UnmetDemand::new(&course.code, key.clone(), missing));
                }
            }
        }

        info!(
            placed = schedule.len(),
            unmet = unmet.len(),
            "timetable allocation finished"
        );

        Ok(AllocationOutcome {
            schedule,
            unmet,
            tracker,
        })
    }

    /// Picks a free, suitable room for `course`/`section` at `slot`.
    fn select_room<'a>(
        &self,
        rooms: &'a [Room],
        tracker: &ConflictTracker,
        course: &Course,
        section: &Section,
        slot: &TimeSlot,
    ) -> Option<&'a Room> {
        let mut candidates = rooms
            .iter()
            .filter(|r| r.suits(course, section) && tracker.is_room_free(&r.id, slot));
        match self.room_selection {
            RoomSelection::FirstFit => candidates.next(),
            RoomSelection::BestFit => candidates.min_by_key(|r| r.capacity),
        }
    }
}
