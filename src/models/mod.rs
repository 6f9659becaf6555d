//! Timetabling domain models.
//!
//! Plain value records describing the inputs (courses, rooms, sections,
//! faculty) and outputs (schedule, unmet demand) of an allocation run.
//! Inputs are read-only once loaded.
//!
//! # Entities
//!
//! | Type | Role | Identity |
//! |------|------|----------|
//! | Course | Demand to be placed | (department, code) |
//! | Room | Capacity- and type-constrained resource | id |
//! | Faculty | Exclusive per-slot resource | id |
//! | Section | Exclusive per-slot consumer | (department, batch, label) |
//! | Schedule | Solution | section → slot → entry |

mod course;
mod faculty;
mod room;
mod schedule;
mod section;
mod slot;

pub use course::Course;
pub use faculty::Faculty;
pub use room::{Room, RoomType};
pub use schedule::{Schedule, ScheduleEntry, TransportSchedule, UnmetDemand};
pub use section::{Section, SectionKey, KEY_DELIMITER};
pub(crate) use section::is_key_component;
pub use slot::{Day, TimeSlot};
