//! Session demand derived from instructional hours.
//!
//! A course with `total_hours` over a term of `weeks_in_term` weeks needs
//! `max(1, round(total_hours / weeks_in_term))` sessions a week, spread at
//! most `max(1, round(weekly / working_days_per_week))` per day.
//!
//! Rounding is done on exact integer ratios, so borderline values such as
//! 2.5 sessions resolve predictably under the chosen [`Rounding`] mode.

use serde::{Deserialize, Serialize};

use crate::error::TimetableError;
use crate::models::Course;

/// How exact halves are rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    /// Banker's rounding: 2.5 → 2, 3.5 → 4.
    #[default]
    HalfEven,
    /// Schoolbook rounding: 2.5 → 3.
    HalfUp,
}

/// Weekly and daily session caps for one course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemandLimits {
    /// Sessions required per week.
    pub weekly: u32,
    /// Maximum sessions on any single day.
    pub daily: u32,
}

/// Converts instructional hours into session limits.
///
/// Pure: the same hours and configuration always give the same limits.
///
/// # Example
/// ```
/// use u_timetable::demand::{DemandCalculator, Rounding};
///
/// let calc = DemandCalculator::new(12, 5, Rounding::HalfEven).unwrap();
/// assert_eq!(calc.weekly_limit(48), 4);
/// assert_eq!(calc.daily_limit(48), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemandCalculator {
    weeks_in_term: u32,
    working_days_per_week: u32,
    rounding: Rounding,
}

impl DemandCalculator {
    /// Creates a calculator.
    ///
    /// Both counts must be positive.
    pub fn new(
        weeks_in_term: u32,
        working_days_per_week: u32,
        rounding: Rounding,
    ) -> Result<Self, TimetableError> {
        if weeks_in_term == 0 {
            return Err(TimetableError::InvalidTerm(weeks_in_term));
        }
        if working_days_per_week == 0 {
            return Err(TimetableError::InvalidWorkingDays(working_days_per_week));
        }
        Ok(Self {
            weeks_in_term,
            working_days_per_week,
            rounding,
        })
    }

    /// Weeks in the teaching term.
    pub fn weeks_in_term(&self) -> u32 {
        self.weeks_in_term
    }

    /// Working days per week.
    pub fn working_days_per_week(&self) -> u32 {
        self.working_days_per_week
    }

    /// Rounding mode.
    pub fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// Sessions required per week. Never less than 1, even for zero hours.
    pub fn weekly_limit(&self, total_hours: u32) -> u32 {
        round_div(total_hours, self.weeks_in_term, self.rounding).max(1)
    }

    /// Maximum sessions per day. Never less than 1.
    pub fn daily_limit(&self, total_hours: u32) -> u32 {
        let weekly = self.weekly_limit(total_hours);
        round_div(weekly, self.working_days_per_week, self.rounding).max(1)
    }

    /// Both limits for a course.
    pub fn limits(&self, course: &Course) -> DemandLimits {
        DemandLimits {
            weekly: self.weekly_limit(course.total_hours),
            daily: self.daily_limit(course.total_hours),
        }
    }
}

/// `round(n / d)` on integers. `d` must be non-zero.
fn round_div(n: u32, d: u32, rounding: Rounding) -> u32 {
    let q = n / d;
    let r = n % d;
    // Compare 2r against d in u64 to stay clear of overflow.
    let twice_r = u64::from(r) * 2;
    let d = u64::from(d);
    if twice_r > d {
        q + 1
    } else if twice_r < d {
        q
    } else {
        match rounding {
            Rounding::HalfUp => q + 1,
            Rounding::HalfEven => q + (q % 2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc(weeks: u32, rounding: Rounding) -> DemandCalculator {
        DemandCalculator::new(weeks, 5, rounding).unwrap()
    }

    #[test]
    fn test_weekly_limit_basic() {
        let c = calc(12, Rounding::HalfEven);
        assert_eq!(c.weekly_limit(48), 4);
        assert_eq!(c.weekly_limit(36), 3);
        assert_eq!(c.weekly_limit(40), 3); // 3.33
        assert_eq!(c.weekly_limit(44), 4); // 3.67
    }

    #[test]
    fn test_zero_hours_floors_to_one() {
        let c = calc(16, Rounding::HalfEven);
        assert_eq!(c.weekly_limit(0), 1);
        assert_eq!(c.daily_limit(0), 1);
        // 4 / 16 = 0.25 → 0 → floored to 1
        assert_eq!(c.weekly_limit(4), 1);
    }

    #[test]
    fn test_half_rounding_modes() {
        // 30 / 12 = 2.5
        assert_eq!(calc(12, Rounding::HalfEven).weekly_limit(30), 2);
        assert_eq!(calc(12, Rounding::HalfUp).weekly_limit(30), 3);
        // 42 / 12 = 3.5 → both modes give 4
        assert_eq!(calc(12, Rounding::HalfEven).weekly_limit(42), 4);
        assert_eq!(calc(12, Rounding::HalfUp).weekly_limit(42), 4);
    }

    #[test]
    fn test_daily_limit() {
        let c = calc(12, Rounding::HalfEven);
        assert_eq!(c.daily_limit(48), 1); // weekly 4 → 0.8 → 1
        assert_eq!(c.daily_limit(96), 2); // weekly 8 → 1.6 → 2
        assert_eq!(c.daily_limit(12), 1); // weekly 1 → 0.2 → 0 → 1
        // weekly 15 → 3.0
        assert_eq!(c.daily_limit(180), 3);
    }

    #[test]
    fn test_daily_half_rounding() {
        // weekly = 5, working days = 2 → 2.5
        let even = DemandCalculator::new(1, 2, Rounding::HalfEven).unwrap();
        let up = DemandCalculator::new(1, 2, Rounding::HalfUp).unwrap();
        assert_eq!(even.daily_limit(5), 2);
        assert_eq!(up.daily_limit(5), 3);
    }

    #[test]
    fn test_limits_for_course() {
        let c = calc(16, Rounding::HalfEven);
        let course = Course::new("CS101", "CSE").with_total_hours(64);
        let l = c.limits(&course);
        assert_eq!(l, DemandLimits { weekly: 4, daily: 1 });
    }

    #[test]
    fn test_pure_and_deterministic() {
        let c = calc(12, Rounding::HalfEven);
        for hours in [0, 1, 30, 48, 100, 1000] {
            assert_eq!(c.weekly_limit(hours), c.weekly_limit(hours));
            assert_eq!(c.daily_limit(hours), c.daily_limit(hours));
        }
    }

    #[test]
    fn test_invalid_configuration() {
        assert!(matches!(
            DemandCalculator::new(0, 5, Rounding::HalfEven),
            Err(TimetableError::InvalidTerm(0))
        ));
        assert!(matches!(
            DemandCalculator::new(12, 0, Rounding::HalfEven),
            Err(TimetableError::InvalidWorkingDays(0))
        ));
    }

    #[test]
    fn test_round_div_large_values() {
        assert_eq!(round_div(u32::MAX, u32::MAX, Rounding::HalfEven), 1);
        assert_eq!(round_div(u32::MAX, 2, Rounding::HalfUp), u32::MAX / 2 + 1);
    }
}
