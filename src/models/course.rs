//! Course model.
//!
//! A course is a unit of instruction owned by a department. Its
//! `total_hours` over the term drives how many weekly sessions it
//! demands (see [`DemandCalculator`](crate::demand::DemandCalculator)).

use serde::{Deserialize, Serialize};

/// A course to be timetabled for every section of its department.
///
/// The faculty reference is fixed at load time; the allocator never
/// re-assigns teachers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course code, unique within its department.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Owning department code.
    pub department: String,
    /// Semester the course belongs to.
    pub semester: u32,
    /// Credit weight.
    pub credits: u32,
    /// Whether sessions must take place in a lab.
    pub requires_lab: bool,
    /// Assigned faculty member ID.
    pub faculty: String,
    /// Total instructional hours over the term.
    pub total_hours: u32,
}

impl Course {
    /// Creates a classroom course with the given code and department.
    pub fn new(code: impl Into<String>, department: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: String::new(),
            department: department.into(),
            semester: 1,
            credits: 0,
            requires_lab: false,
            faculty: String::new(),
            total_hours: 0,
        }
    }

    /// Sets the course name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the semester.
    pub fn with_semester(mut self, semester: u32) -> Self {
        self.semester = semester;
        self
    }

    /// Sets the credit weight.
    pub fn with_credits(mut self, credits: u32) -> Self {
        self.credits = credits;
        self
    }

    /// Marks the course as lab-only.
    pub fn with_lab(mut self, requires_lab: bool) -> Self {
        self.requires_lab = requires_lab;
        self
    }

    /// Sets the assigned faculty member.
    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = faculty.into();
        self
    }

    /// Sets total instructional hours over the term.
    pub fn with_total_hours(mut self, total_hours: u32) -> Self {
        self.total_hours = total_hours;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_builder() {
        let c = Course::new("CS101", "CSE")
            .with_name("Programming")
            .with_semester(3)
            .with_credits(4)
            .with_lab(true)
            .with_faculty("F1")
            .with_total_hours(48);

        assert_eq!(c.code, "CS101");
        assert_eq!(c.department, "CSE");
        assert_eq!(c.name, "Programming");
        assert_eq!(c.semester, 3);
        assert_eq!(c.credits, 4);
        assert!(c.requires_lab);
        assert_eq!(c.faculty, "F1");
        assert_eq!(c.total_hours, 48);
    }

    #[test]
    fn test_course_defaults() {
        let c = Course::new("MA201", "MATH");
        assert!(!c.requires_lab);
        assert_eq!(c.total_hours, 0);
        assert!(c.faculty.is_empty());
    }
}
