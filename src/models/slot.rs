//! Weekday and time slot value types.
//!
//! A [`TimeSlot`] is the atomic unit of schedulable time: one period on
//! one working day. Its identity is `(day, time)` and its transport form
//! is the single string `"{Day} {Time}"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// A working day of the teaching week.
///
/// Ordering follows the calendar (Monday first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Day {
    /// Monday.
    Monday,
    /// Tuesday.
    Tuesday,
    /// Wednesday.
    Wednesday,
    /// Thursday.
    Thursday,
    /// Friday.
    Friday,
}

impl Day {
    /// All working days, Monday through Friday.
    pub const ALL: [Day; 5] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
    ];

    /// Full English name.
    pub fn name(self) -> &'static str {
        match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Day {
    type Err = TimetableError;

    /// Accepts full names, three-letter abbreviations and the numeric
    /// codes `1`..`5` (Monday = 1), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let day = match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" | "1" => Day::Monday,
            "tuesday" | "tue" | "2" => Day::Tuesday,
            "wednesday" | "wed" | "3" => Day::Wednesday,
            "thursday" | "thu" | "4" => Day::Thursday,
            "friday" | "fri" | "5" => Day::Friday,
            _ => return Err(TimetableError::InvalidDay(s.to_string())),
        };
        Ok(day)
    }
}

impl From<Day> for String {
    fn from(day: Day) -> Self {
        day.name().to_string()
    }
}

impl TryFrom<String> for Day {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A (day, period) pair.
///
/// The period label is opaque (e.g. `"9:00"`); its position in the week
/// is defined by the [`SlotCatalog`](crate::catalog::SlotCatalog) that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TimeSlot {
    /// Working day.
    pub day: Day,
    /// Period label.
    pub time: String,
}

impl TimeSlot {
    /// Creates a new time slot.
    pub fn new(day: Day, time: impl Into<String>) -> Self {
        Self {
            day,
            time: time.into(),
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.day, self.time)
    }
}

impl FromStr for TimeSlot {
    type Err = TimetableError;

    /// Parses `"{Day} {Time}"`. The day ends at the first space; the
    /// remainder (which may itself contain spaces) is the period label.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, time) = s
            .split_once(' ')
            .ok_or_else(|| TimetableError::InvalidTimeSlot(s.to_string()))?;
        if time.is_empty() {
            return Err(TimetableError::InvalidTimeSlot(s.to_string()));
        }
        let day = day
            .parse()
            .map_err(|_| TimetableError::InvalidTimeSlot(s.to_string()))?;
        Ok(Self::new(day, time))
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_parsing_variants() {
        assert_eq!("Monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("wed".parse::<Day>().unwrap(), Day::Wednesday);
        assert_eq!("5".parse::<Day>().unwrap(), Day::Friday);
        assert!("Saturday".parse::<Day>().is_err());
        assert!("6".parse::<Day>().is_err());
    }

    #[test]
    fn test_day_ordering() {
        assert!(Day::Monday < Day::Friday);
        let mut days = vec![Day::Thursday, Day::Monday, Day::Tuesday];
        days.sort();
        assert_eq!(days, vec![Day::Monday, Day::Tuesday, Day::Thursday]);
    }

    #[test]
    fn test_slot_display() {
        let slot = TimeSlot::new(Day::Tuesday, "10:00");
        assert_eq!(slot.to_string(), "Tuesday 10:00");
    }

    #[test]
    fn test_slot_parse_keeps_spaces_in_time() {
        let slot: TimeSlot = "Friday 2:00 PM".parse().unwrap();
        assert_eq!(slot.day, Day::Friday);
        assert_eq!(slot.time, "2:00 PM");
    }

    #[test]
    fn test_slot_parse_rejects_malformed() {
        assert!("Monday".parse::<TimeSlot>().is_err());
        assert!("Monday ".parse::<TimeSlot>().is_err());
        assert!("Someday 9:00".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_slot_serde_uses_string_form() {
        let slot = TimeSlot::new(Day::Monday, "9:00");
        let json = serde_json::to_string(&slot).unwrap();
        assert_eq!(json, "\"Monday 9:00\"");
        let back: TimeSlot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, slot);
    }
}
