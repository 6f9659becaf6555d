//! Run configuration.
//!
//! Layered the usual way: built-in defaults, then an optional TOML file,
//! then `TIMETABLE_*` environment variables.
//!
//! ```toml
//! days = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"]
//! times = ["9:00", "10:00", "11:00"]
//! weeks_in_term = 16
//! working_days_per_week = 5
//! seed = 7
//! rounding = "half_up"
//! room_selection = "best_fit"
//! slot_order = "sequential"
//! ```

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::catalog::{SlotCatalog, DEFAULT_TIMES};
use crate::demand::{DemandCalculator, Rounding};
use crate::error::TimetableError;
use crate::models::Day;
use crate::scheduler::{RoomSelection, SlotOrder};

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "TIMETABLE_";

/// Parameters of one allocation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimetableConfig {
    /// Teaching days, in catalog order.
    pub days: Vec<Day>,
    /// Period labels, in catalog order.
    pub times: Vec<String>,
    /// Weeks in the teaching term (12 or 16 in practice).
    pub weeks_in_term: u32,
    /// Working days per week used for the daily cap.
    pub working_days_per_week: u32,
    /// Seed for the slot shuffle.
    pub seed: u64,
    /// Rounding of fractional session counts.
    pub rounding: Rounding,
    /// Room tie-break policy.
    pub room_selection: RoomSelection,
    /// Slot visiting order.
    pub slot_order: SlotOrder,
}

impl Default for TimetableConfig {
    fn default() -> Self {
        Self {
            days: Day::ALL.to_vec(),
            times: DEFAULT_TIMES.iter().map(|t| (*t).to_string()).collect(),
            weeks_in_term: 12,
            working_days_per_week: 5,
            seed: 0,
            rounding: Rounding::default(),
            room_selection: RoomSelection::default(),
            slot_order: SlotOrder::default(),
        }
    }
}

impl TimetableConfig {
    /// Loads configuration from defaults and environment.
    #[allow(clippy::result_large_err)]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally merging a TOML file.
    #[allow(clippy::result_large_err)]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX));

        figment.extract()
    }

    /// Sets the shuffle seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Sets weeks in term.
    pub fn with_weeks_in_term(mut self, weeks: u32) -> Self {
        self.weeks_in_term = weeks;
        self
    }

    /// Sets the catalog days.
    pub fn with_days(mut self, days: Vec<Day>) -> Self {
        self.days = days;
        self
    }

    /// Sets the catalog period labels.
    pub fn with_times<I, S>(mut self, times: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.times = times.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the rounding mode.
    pub fn with_rounding(mut self, rounding: Rounding) -> Self {
        self.rounding = rounding;
        self
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

    /// Builds the slot catalog described by this configuration.
    pub fn catalog(&self) -> Result<SlotCatalog, TimetableError> {
        SlotCatalog::new(self.days.clone(), self.times.clone())
    }

    /// Builds the demand calculator described by this configuration.
    pub fn demand(&self) -> Result<DemandCalculator, TimetableError> {
        DemandCalculator::new(self.weeks_in_term, self.working_days_per_week, self.rounding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let c = TimetableConfig::default();
        assert_eq!(c.days.len(), 5);
        assert_eq!(c.times.len(), 7);
        assert_eq!(c.weeks_in_term, 12);
        assert_eq!(c.working_days_per_week, 5);
        assert_eq!(c.rounding, Rounding::HalfEven);
        assert_eq!(c.room_selection, RoomSelection::FirstFit);
        assert_eq!(c.slot_order, SlotOrder::Shuffled);
        assert_eq!(c.catalog().unwrap().len(), 35);
    }

    #[test]
    fn test_builders() {
        let c = TimetableConfig::default()
            .with_seed(9)
            .with_weeks_in_term(16)
            .with_days(vec![Day::Monday])
            .with_times(["8:00", "9:00"])
            .with_rounding(Rounding::HalfUp)
            .with_room_selection(RoomSelection::BestFit)
            .with_slot_order(SlotOrder::Sequential);
        assert_eq!(c.seed, 9);
        assert_eq!(c.weeks_in_term, 16);
        assert_eq!(c.catalog().unwrap().len(), 2);
        assert_eq!(c.demand().unwrap().weeks_in_term(), 16);
    }

    #[test]
    fn test_invalid_config_surfaces_errors() {
        let c = TimetableConfig::default().with_weeks_in_term(0);
        assert!(matches!(c.demand(), Err(TimetableError::InvalidTerm(0))));

        let c = TimetableConfig::default().with_times(Vec::<String>::new());
        assert!(matches!(c.catalog(), Err(TimetableError::EmptySlotCatalog(_))));
    }

    #[test]
    fn test_load_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
days = ["Monday", "Friday"]
times = ["8:00"]
weeks_in_term = 16
seed = 77
rounding = "half_up"
room_selection = "best_fit"
slot_order = "sequential"
"#
        )
        .unwrap();

        let c = TimetableConfig::load_from(Some(file.path())).unwrap();
        assert_eq!(c.days, vec![Day::Monday, Day::Friday]);
        assert_eq!(c.times, vec!["8:00".to_string()]);
        assert_eq!(c.weeks_in_term, 16);
        assert_eq!(c.working_days_per_week, 5); // default kept
        assert_eq!(c.seed, 77);
        assert_eq!(c.rounding, Rounding::HalfUp);
        assert_eq!(c.room_selection, RoomSelection::BestFit);
        assert_eq!(c.slot_order, SlotOrder::Sequential);
    }

    #[test]
    fn test_serde_round_trip() {
        let c = TimetableConfig::default().with_seed(5);
        let json = serde_json::to_string(&c).unwrap();
        let back: TimetableConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
