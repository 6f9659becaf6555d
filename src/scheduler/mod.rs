//! Greedy timetable allocation and KPI evaluation.
//!
//! # Algorithm
//!
//! `Allocator` makes a single greedy pass over sections × courses ×
//! slots × rooms, consulting a `ConflictTracker` before every commit.
//! It never backtracks: it is fast and predictable, but over-constrained
//! instances leave [`UnmetDemand`](crate::models::UnmetDemand) behind.
//!
//! # KPI
//!
//! `TimetableKpi` computes coverage (fill rate) and room utilization.
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Burke & Petrovic (2002), "Recent research directions in automated timetabling"

mod allocator;
mod kpi;
mod tracker;

pub use allocator::{
    AllocationOutcome, AllocationReport, AllocationRequest, Allocator, RoomSelection, SlotOrder,
};
pub use kpi::TimetableKpi;
pub use tracker::ConflictTracker;
