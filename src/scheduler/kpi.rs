//! Timetable quality metrics (KPIs).
//!
//! Computes coverage and utilization indicators from a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Sessions demanded | placed + missing |
//! | Fill rate | placed / demanded |
//! | Room utilization | sessions placed this run / catalog slots, per room |
//! | Faculty load | sessions taught per week, per faculty member |

use std::collections::HashMap;

use crate::catalog::SlotCatalog;
use crate::models::Room;

use super::AllocationOutcome;

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Sessions the run tried to place.
    pub sessions_demanded: u32,
    /// Sessions placed.
    pub sessions_placed: u32,
    /// Sessions that could not be placed.
    pub sessions_missing: u32,
    /// Fraction of demand placed (0.0..1.0). 1.0 when nothing was demanded.
    pub fill_rate: f64,
    /// Per-room utilization (0.0..1.0).
    pub utilization_by_room: HashMap<String, f64>,
    /// Mean room utilization over all declared rooms.
    pub avg_room_utilization: f64,
    /// Weekly sessions per faculty member.
    pub sessions_by_faculty: HashMap<String, u32>,
}

impl TimetableKpi {
    /// Computes KPIs for an outcome.
    ///
    /// # Arguments
    /// * `outcome` - The finished run.
    /// * `rooms` - All declared rooms (unused rooms count as 0% utilized).
    /// * `catalog` - The slot catalog the run used.
    pub fn calculate(outcome: &AllocationOutcome, rooms: &[Room], catalog: &SlotCatalog) -> Self {
        let sessions_placed = outcome.schedule.len() as u32;
        let sessions_missing = outcome.missing_sessions();
        let sessions_demanded = sessions_placed + sessions_missing;

        let fill_rate = if sessions_demanded == 0 {
            1.0
        } else {
            f64::from(sessions_placed) / f64::from(sessions_demanded)
        };

        let week = catalog.len() as f64;
        let utilization_by_room: HashMap<String, f64> = rooms
            .iter()
            .map(|r| {
                let busy = outcome.schedule.entries_for_room(&r.id).count() as f64;
                (r.id.clone(), if week > 0.0 { busy / week } else { 0.0 })
            })
            .collect();
        let avg_room_utilization = if utilization_by_room.is_empty() {
            0.0
        } else {
            utilization_by_room.values().sum::<f64>() / utilization_by_room.len() as f64
        };

        let mut sessions_by_faculty: HashMap<String, u32> = HashMap::new();
        for (_, _, entry) in outcome.schedule.entries() {
            *sessions_by_faculty.entry(entry.faculty.clone()).or_insert(0) += 1;
        }

        Self {
            sessions_demanded,
            sessions_placed,
            sessions_missing,
            fill_rate,
            utilization_by_room,
            avg_room_utilization,
            sessions_by_faculty,
        }
    }

    /// Whether the run meets the given coverage and utilization thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, min_utilization: f64) -> bool {
        self.fill_rate >= min_fill_rate && self.avg_room_utilization >= min_utilization
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use crate::models::{Course, Day, Section};
    use crate::scheduler::{AllocationRequest, Allocator};

    fn run(request: &AllocationRequest, config: TimetableConfig) -> (AllocationOutcome, SlotCatalog) {
        let allocator = Allocator::new(config).unwrap();
        let outcome = allocator.allocate(request).unwrap();
        (outcome, allocator.catalog().clone())
    }

    #[test]
    fn test_kpi_complete_run() {
        let request = AllocationRequest::new(
            vec![Course::new("CS101", "CSE").with_faculty("F1").with_total_hours(48)],
            vec![Room::classroom("R1", 40), Room::classroom("R2", 40)],
            vec![Section::new("CSE", 2022, "A").with_strength(30)],
        );
        let config = TimetableConfig::default()
            .with_days(Day::ALL.to_vec())
            .with_times(["9:00", "10:00"]);
        let (outcome, catalog) = run(&request, config);
        let kpi = TimetableKpi::calculate(&outcome, &request.rooms, &catalog);

        assert_eq!(kpi.sessions_demanded, 4);
        assert_eq!(kpi.sessions_placed, 4);
        assert_eq!(kpi.sessions_missing, 0);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        // First-fit puts everything in R1: 4 of 10 slots
        assert!((kpi.utilization_by_room["R1"] - 0.4).abs() < 1e-10);
        assert!((kpi.utilization_by_room["R2"] - 0.0).abs() < 1e-10);
        assert!((kpi.avg_room_utilization - 0.2).abs() < 1e-10);
        assert_eq!(kpi.sessions_by_faculty["F1"], 4);
        assert!(kpi.meets_thresholds(1.0, 0.2));
        assert!(!kpi.meets_thresholds(1.0, 0.5));
    }

    #[test]
    fn test_kpi_partial_run() {
        let request = AllocationRequest::new(
            vec![Course::new("CS101L", "CSE")
                .with_faculty("F1")
                .with_lab(true)
                .with_total_hours(48)],
            vec![Room::classroom("R1", 40)],
            vec![Section::new("CSE", 2022, "A").with_strength(30)],
        );
        let (outcome, catalog) = run(&request, TimetableConfig::default());
        let kpi = TimetableKpi::calculate(&outcome, &request.rooms, &catalog);

        assert_eq!(kpi.sessions_demanded, 4);
        assert_eq!(kpi.sessions_placed, 0);
        assert_eq!(kpi.sessions_missing, 4);
        assert!((kpi.fill_rate - 0.0).abs() < 1e-10);
        assert!(kpi.sessions_by_faculty.is_empty());
    }

    #[test]
    fn test_kpi_ignores_prebooked_occupancy() {
        use crate::models::{SectionKey, TimeSlot};
        use crate::scheduler::ConflictTracker;

        let request = AllocationRequest::new(
            vec![Course::new("CS101", "CSE").with_faculty("F1").with_total_hours(12)],
            vec![Room::classroom("R1", 40)],
            vec![Section::new("CSE", 2022, "A").with_strength(30)],
        );
        let config = TimetableConfig::default()
            .with_days(Day::ALL.to_vec())
            .with_times(["9:00", "10:00"]);
        let allocator = Allocator::new(config).unwrap();

        // R1 is already used twice by another department
        let mut tracker = ConflictTracker::new();
        let other = SectionKey::new("ME", 2022, "A");
        assert!(tracker.commit("ME101", &other, "F9", "R1", &TimeSlot::new(Day::Monday, "9:00")));
        assert!(tracker.commit("ME101", &other, "F9", "R1", &TimeSlot::new(Day::Tuesday, "9:00")));

        let outcome = allocator.allocate_with(&request, tracker).unwrap();
        assert_eq!(outcome.tracker.room_slots("R1"), 3);

        let kpi = TimetableKpi::calculate(&outcome, &request.rooms, allocator.catalog());
        assert_eq!(kpi.sessions_placed, 1);
        // Only this run's single session counts: 1 of 10 slots
        assert!((kpi.utilization_by_room["R1"] - 0.1).abs() < 1e-10);
    }

    #[test]
    fn test_kpi_nothing_demanded() {
        let request = AllocationRequest::new(vec![], vec![Room::classroom("R1", 40)], vec![]);
        let (outcome, catalog) = run(&request, TimetableConfig::default());
        let kpi = TimetableKpi::calculate(&outcome, &request.rooms, &catalog);
        assert_eq!(kpi.sessions_demanded, 0);
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
    }
}
