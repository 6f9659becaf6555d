//! Academic timetable allocation.
//!
//! Assigns weekly teaching sessions of department courses to
//! (day, period) slots and rooms for every student section, without
//! double-booking a faculty member, a room or a section.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Course`, `Room`, `Section`, `Faculty`,
//!   `TimeSlot`, `Schedule`, `UnmetDemand`
//! - **`catalog`**: The ordered weekly slot catalog and its seeded shuffle
//! - **`demand`**: Weekly and daily session limits from total hours
//! - **`scheduler`**: Greedy `Allocator`, `ConflictTracker`, `TimetableKpi`
//! - **`validation`**: Input integrity checks and post-hoc schedule verification
//! - **`loader`**: Department-structured JSON dataset ingestion
//! - **`config`**: Layered run configuration
//!
//! # Example
//!
//! ```
//! use u_timetable::config::TimetableConfig;
//! use u_timetable::models::{Course, Room, Section};
//! use u_timetable::scheduler::{AllocationRequest, Allocator};
//!
//! let request = AllocationRequest::new(
//!     vec![Course::new("CS101", "CSE").with_faculty("F1").with_total_hours(48)],
//!     vec![Room::classroom("R1", 60)],
//!     vec![Section::new("CSE", 2022, "A").with_strength(50)],
//! );
//! let allocator = Allocator::new(TimetableConfig::default().with_seed(7)).unwrap();
//! let outcome = allocator.allocate(&request).unwrap();
//!
//! // 48 hours over 12 weeks: 4 sessions a week, at most 1 a day
//! assert_eq!(outcome.schedule.len(), 4);
//! assert!(outcome.is_complete());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

pub mod catalog;
pub mod config;
pub mod demand;
pub mod error;
pub mod loader;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::TimetableError;
