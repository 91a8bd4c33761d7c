//! Conflict evaluation core.
//!
//! For one candidate (day, start) block, every course may re-pick its best
//! section independently. A course where every section collides with the
//! block is an unavoidable conflict; a course where only some sections
//! collide is still schedulable but loses choices ("blocked"). The result
//! is a per-course lower bound, not a joint assignment across blocks.

use serde::Serialize;

use crate::algorithm::grid::{BLOCK_LEN, overlaps};
use crate::models::{Catalog, Section};

/// Evaluation of one candidate block.
#[derive(Debug, Clone, Serialize)]
pub struct BlockReport {
    pub day: char,
    /// Block start, minutes from midnight.
    pub start: i32,
    /// Number of unavoidable-conflict courses.
    pub score: usize,
    /// Courses where every section overlaps the block, sorted by code.
    pub conflicts: Vec<String>,
    /// Courses that stay schedulable only by giving up sections, sorted.
    pub blocked: Vec<String>,
}

/// True if this section has any meeting on `day` whose interval overlaps
/// `block`. Labs are bundled into the section's meeting list, so lecture
/// and lab are checked as one inseparable choice. A section with no
/// meeting on `day` never overlaps, whatever its other days hold.
fn section_overlaps_block(section: &Section, day: char, block: (i32, i32)) -> bool {
    section
        .meetings
        .iter()
        .any(|m| m.meets_on(day) && overlaps(m.interval(), block))
}

/// Scores the 100-minute block starting at `start` on `day` against the
/// whole catalog.
///
/// Pure and total: any in-grid query yields a well-formed report, and the
/// conflict and blocked sets are disjoint by construction.
pub fn evaluate_block(catalog: &Catalog, day: char, start: i32) -> BlockReport {
    let block = (start, start + BLOCK_LEN);
    let mut conflicts = Vec::new();
    let mut blocked = Vec::new();

    for (course, sections) in catalog.iter() {
        let mut any_overlap = false;
        let mut any_clear = false;
        for section in sections {
            if section_overlaps_block(section, day, block) {
                any_overlap = true;
            } else {
                any_clear = true;
            }
        }

        if !any_clear {
            conflicts.push(course.clone());
        } else if any_overlap {
            blocked.push(course.clone());
        }
    }

    BlockReport {
        day,
        start,
        score: conflicts.len(),
        conflicts,
        blocked,
    }
}
