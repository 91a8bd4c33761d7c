// Core data structures: meetings, section bundles, and the course catalog.

use std::collections::BTreeMap;

use serde::Serialize;

/// One scheduled occurrence. The same time slot repeats on every listed
/// weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meeting {
    /// Uppercase weekday letters, a non-empty subset of "MTWRF".
    pub days: String,
    /// Minutes from midnight.
    pub start: i32,
    /// Length in minutes, always positive.
    pub duration: i32,
    /// Display label, e.g. "MEEN 221" or "MEEN 221 (Lab)".
    pub label: String,
}

impl Meeting {
    /// The occupied interval as half-open minutes `[start, start + duration)`.
    #[inline]
    pub fn interval(&self) -> (i32, i32) {
        (self.start, self.start + self.duration)
    }

    /// Whether this meeting occurs on the given day letter.
    #[inline]
    pub fn meets_on(&self, day: char) -> bool {
        self.days.contains(day)
    }
}

/// One selectable way to take a course: a lecture alone, or a lecture plus
/// its lab. The bundled meetings are inseparable; choosing this section
/// commits to all of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    /// Owning course code ("MEEN 221").
    pub course: String,
    /// One or two meetings, lecture first.
    pub meetings: Vec<Meeting>,
}

/// All validated courses and their interchangeable sections.
///
/// Keyed by full course code; each course maps to its sections in input-row
/// order. A course with no valid rows never appears, so every present entry
/// has at least one section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    courses: BTreeMap<String, Vec<Section>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section under its course code.
    pub fn insert(&mut self, section: Section) {
        self.courses
            .entry(section.course.clone())
            .or_default()
            .push(section);
    }

    /// The sections offered for a course, in input order.
    pub fn options_for(&self, course: &str) -> Option<&[Section]> {
        self.courses.get(course).map(|v| v.as_slice())
    }

    /// Iterates `(course, sections)` pairs sorted by course code. This
    /// ordering is what makes conflict and blocked lists deterministic.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<Section>)> {
        self.courses.iter()
    }

    /// Number of distinct courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}
