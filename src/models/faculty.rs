//! Faculty model.
//!
//! Faculty are resolved onto courses at load time (see
//! [`loader`](crate::loader)); once a course carries a faculty reference
//! the allocator only uses it as a conflict key.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A faculty member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faculty {
    /// Unique faculty identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Subject codes this member can teach.
    #[serde(default)]
    pub specializations: BTreeSet<String>,
    /// Declared daily teaching ceiling (hours). Informational only;
    /// exporters derive it from weekly hours, so it may be fractional.
    #[serde(default)]
    pub max_hours_per_day: f64,
}

impl Faculty {
    /// Creates a new faculty member.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            specializations: BTreeSet::new(),
            max_hours_per_day: 0.0,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a specialization.
    pub fn with_specialization(mut self, code: impl Into<String>) -> Self {
        self.specializations.insert(code.into());
        self
    }

    /// Sets the daily teaching ceiling.
    pub fn with_max_hours_per_day(mut self, hours: f64) -> Self {
        self.max_hours_per_day = hours;
        self
    }

    /// Whether this member lists `code` among their specializations.
    pub fn teaches(&self, code: &str) -> bool {
        self.specializations.contains(code)
    }
}
