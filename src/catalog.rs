//! Slot catalog: the finite set of candidate (day, period) pairs in a week.
//!
//! The catalog is the Cartesian product of a day list and a period list,
//! in configured order. Allocation runs walk either that order or a
//! seeded permutation of it, so earlier days and periods are not
//! systematically favored across runs.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use crate::error::TimetableError;
use crate::models::{Day, TimeSlot};

/// Period labels used when none are configured.
pub const DEFAULT_TIMES: [&str; 7] = ["9:00", "10:00", "11:00", "12:00", "2:00", "3:00", "4:00"];

/// Ordered week of candidate slots.
///
/// # Example
/// ```
/// use u_timetable::catalog::SlotCatalog;
/// use u_timetable::models::Day;
///
/// let catalog = SlotCatalog::new(vec![Day::Monday, Day::Tuesday], vec!["9:00".into()]).unwrap();
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.slots()[1].to_string(), "Tuesday 9:00");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCatalog {
    days: Vec<Day>,
    times: Vec<String>,
    slots: Vec<TimeSlot>,
}

impl SlotCatalog {
    /// Builds a catalog from day and period lists.
    ///
    /// Fails if either list is empty or contains a duplicate.
    pub fn new(days: Vec<Day>, times: Vec<String>) -> Result<Self, TimetableError> {
        if days.is_empty() {
            return Err(TimetableError::EmptySlotCatalog("no days configured".into()));
        }
        if times.is_empty() {
            return Err(TimetableError::EmptySlotCatalog("no periods configured".into()));
        }

        let mut seen_days = HashSet::new();
        for day in &days {
            if !seen_days.insert(*day) {
                return Err(TimetableError::DuplicateSlotLabel(day.to_string()));
            }
        }
        let mut seen_times = HashSet::new();
        for time in &times {
            if time.trim().is_empty() {
                return Err(TimetableError::EmptySlotCatalog(
                    "blank period label".into(),
                ));
            }
            if !seen_times.insert(time.as_str()) {
                return Err(TimetableError::DuplicateSlotLabel(time.clone()));
            }
        }

        let slots = days
            .iter()
            .flat_map(|&day| times.iter().map(move |t| TimeSlot::new(day, t.clone())))
            .collect();

        Ok(Self { days, times, slots })
    }

    /// Configured days, in order.
    pub fn days(&self) -> &[Day] {
        &self.days
    }

    /// Configured period labels, in order.
    pub fn times(&self) -> &[String] {
        &self.times
    }

    /// All slots, day-major in configured order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Number of slots in the week.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether `slot` belongs to this catalog.
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        self.days.contains(&slot.day) && self.times.iter().any(|t| *t == slot.time)
    }

    /// A permuted copy of the slots, reproducible from `seed`.
    pub fn shuffled(&self, seed: u64) -> Vec<TimeSlot> {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.shuffled_with(&mut rng)
    }

    /// A permuted copy of the slots drawn from a caller-owned generator.
    pub fn shuffled_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<TimeSlot> {
        let mut slots = self.slots.clone();
        slots.shuffle(rng);
        slots
    }
}

impl Default for SlotCatalog {
    /// Monday–Friday × [`DEFAULT_TIMES`].
    fn default() -> Self {
        let times = DEFAULT_TIMES.iter().map(|t| (*t).to_string()).collect::<Vec<_>>();
        let slots = Day::ALL
            .iter()
            .flat_map(|&day| times.iter().map(move |t| TimeSlot::new(day, t.clone())))
            .collect();
        Self {
            days: Day::ALL.to_vec(),
            times,
            slots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> SlotCatalog {
        SlotCatalog::new(
            vec![Day::Monday, Day::Wednesday],
            vec!["9:00".into(), "10:00".into()],
        )
        .unwrap()
    }

    #[test]
    fn test_cartesian_order() {
        let c = two_by_two();
        let labels: Vec<String> = c.slots().iter().map(ToString::to_string).collect();
        assert_eq!(
            labels,
            vec!["Monday 9:00", "Monday 10:00", "Wednesday 9:00", "Wednesday 10:00"]
        );
        assert_eq!(c.len(), 4);
        assert!(!c.is_empty());
    }

    #[test]
    fn test_default_catalog() {
        let c = SlotCatalog::default();
        assert_eq!(c.len(), 35);
        assert_eq!(c.days().len(), 5);
        assert_eq!(c.times()[0], "9:00");
        assert_eq!(c.slots()[0], TimeSlot::new(Day::Monday, "9:00"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            SlotCatalog::new(vec![], vec!["9:00".into()]),
            Err(TimetableError::EmptySlotCatalog(_))
        ));
        assert!(matches!(
            SlotCatalog::new(vec![Day::Monday], vec![]),
            Err(TimetableError::EmptySlotCatalog(_))
        ));
        assert!(SlotCatalog::new(vec![Day::Monday], vec!["  ".into()]).is_err());
    }

    #[test]
    fn test_duplicate_labels_rejected() {
        assert!(matches!(
            SlotCatalog::new(vec![Day::Monday, Day::Monday], vec!["9:00".into()]),
            Err(TimetableError::DuplicateSlotLabel(_))
        ));
        assert!(matches!(
            SlotCatalog::new(vec![Day::Monday], vec!["9:00".into(), "9:00".into()]),
            Err(TimetableError::DuplicateSlotLabel(_))
        ));
    }

    #[test]
    fn test_contains() {
        let c = two_by_two();
        assert!(c.contains(&TimeSlot::new(Day::Monday, "10:00")));
        assert!(!c.contains(&TimeSlot::new(Day::Tuesday, "10:00")));
        assert!(!c.contains(&TimeSlot::new(Day::Monday, "11:00")));
    }

    #[test]
    fn test_shuffled_is_permutation() {
        let c = SlotCatalog::default();
        let mut shuffled = c.shuffled(7);
        assert_eq!(shuffled.len(), c.len());
        shuffled.sort();
        let mut original = c.slots().to_vec();
        original.sort();
        assert_eq!(shuffled, original);
    }

    #[test]
    fn test_shuffled_reproducible() {
        let c = SlotCatalog::default();
        assert_eq!(c.shuffled(42), c.shuffled(42));
        // The catalog itself is untouched
        assert_eq!(c.slots()[0], TimeSlot::new(Day::Monday, "9:00"));
    }

    #[test]
    fn test_shuffled_with_shared_rng() {
        let c = SlotCatalog::default();
        let mut a = SmallRng::seed_from_u64(3);
        let mut b = SmallRng::seed_from_u64(3);
        let first_a = c.shuffled_with(&mut a);
        let second_a = c.shuffled_with(&mut a);
        assert_eq!(first_a, c.shuffled_with(&mut b));
        assert_eq!(second_a, c.shuffled_with(&mut b));
    }
}
