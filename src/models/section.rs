//! Section (class group) model and its composite key.
//!
//! A section is a cohort of students sharing one timetable. It is
//! identified by `(department, batch, label)`, which travels as the
//! single string `"{department}_{batch}_{label}"`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimetableError;

/// Delimiter joining the parts of a [`SectionKey`] in transport form.
pub const KEY_DELIMITER: char = '_';

/// A section of students.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Department code.
    pub department: String,
    /// Batch (admission year / cohort).
    pub batch: u32,
    /// Section label within the batch (e.g. "A").
    pub label: String,
    /// Enrolled headcount.
    pub strength: u32,
}

impl Section {
    /// Creates a new section with zero strength.
    pub fn new(department: impl Into<String>, batch: u32, label: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            batch,
            label: label.into(),
            strength: 0,
        }
    }

    /// Sets the enrolled headcount.
    pub fn with_strength(mut self, strength: u32) -> Self {
        self.strength = strength;
        self
    }

    /// Composite key of this section.
    pub fn key(&self) -> SectionKey {
        SectionKey::new(self.department.clone(), self.batch, self.label.clone())
    }
}

/// Composite identity of a section: `(department, batch, label)`.
///
/// Converts losslessly to and from `"{department}_{batch}_{label}"` as
/// long as neither the department nor the label contains
/// [`KEY_DELIMITER`]; input validation rejects such identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct SectionKey {
    /// Department code.
    pub department: String,
    /// Batch (admission year / cohort).
    pub batch: u32,
    /// Section label.
    pub label: String,
}

impl SectionKey {
    /// Creates a new key.
    pub fn new(department: impl Into<String>, batch: u32, label: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            batch,
            label: label.into(),
        }
    }

    /// Whether every part can round-trip through the transport form.
    pub fn is_encodable(&self) -> bool {
        is_key_component(&self.department) && is_key_component(&self.label)
    }
}

/// Whether `s` is usable as one part of a delimited key.
pub(crate) fn is_key_component(s: &str) -> bool {
    !s.is_empty() && !s.contains(KEY_DELIMITER)
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{KEY_DELIMITER}{}{KEY_DELIMITER}{}",
            self.department, self.batch, self.label
        )
    }
}

impl FromStr for SectionKey {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimetableError::InvalidSectionKey(s.to_string());
        let parts: Vec<&str> = s.split(KEY_DELIMITER).collect();
        let [department, batch, label] = parts.as_slice() else {
            return Err(invalid());
        };
        if department.is_empty() || label.is_empty() {
            return Err(invalid());
        }
        let batch = batch.parse::<u32>().map_err(|_| invalid())?;
        Ok(Self::new(*department, batch, *label))
    }
}

impl From<SectionKey> for String {
    fn from(key: SectionKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for SectionKey {
    type Error = TimetableError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_key() {
        let s = Section::new("CSE", 2022, "A").with_strength(60);
        let key = s.key();
        assert_eq!(key, SectionKey::new("CSE", 2022, "A"));
        assert_eq!(key.to_string(), "CSE_2022_A");
        assert_eq!(s.strength, 60);
    }

    #[test]
    fn test_section_key_parse() {
        let key: SectionKey = "ECE_2021_B".parse().unwrap();
        assert_eq!(key.department, "ECE");
        assert_eq!(key.batch, 2021);
        assert_eq!(key.label, "B");
    }

    #[test]
    fn test_section_key_rejects_malformed() {
        assert!("CSE_2022".parse::<SectionKey>().is_err());
        assert!("CSE_AI_2022_A".parse::<SectionKey>().is_err());
        assert!("CSE_batch_A".parse::<SectionKey>().is_err());
        assert!("_2022_A".parse::<SectionKey>().is_err());
        assert!("CSE_2022_".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_section_key_encodable() {
        assert!(SectionKey::new("CSE", 1, "A").is_encodable());
        assert!(!SectionKey::new("CSE_AI", 1, "A").is_encodable());
        assert!(!SectionKey::new("CSE", 1, "").is_encodable());
    }

    #[test]
    fn test_section_key_serde_uses_string_form() {
        let key = SectionKey::new("ME", 2023, "C");
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"ME_2023_C\"");
        let back: SectionKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
