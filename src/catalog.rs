//! Row validation and catalog construction.
//!
//! One malformed row never aborts the load: it is rejected with a reason
//! keyed by the attempted course code and the remaining rows continue.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use crate::algorithm::grid::to_minutes;
use crate::error::RowError;
use crate::excel::SectionRow;
use crate::models::{Catalog, Meeting, Section};

static SUBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Z]{4}$").unwrap());
static NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{3}[Ll]?$").unwrap());
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(2[0-3]|[01]\d):[0-5]\d$").unwrap());
static DAYS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[MTWRF]+$").unwrap());

/// Tokens accepted as a set lab flag, compared uppercased.
const LAB_TRUTHY: [&str; 4] = ["Y", "YES", "TRUE", "1"];

/// Whether a lab-flag cell marks the row as having a lab.
pub fn is_truthy(flag: &str) -> bool {
    LAB_TRUTHY.contains(&flag.trim().to_uppercase().as_str())
}

/// One rejected row and why.
#[derive(Debug, Clone)]
pub struct RowReject {
    /// The course code the row claimed, as attempted.
    pub code: String,
    pub reason: RowError,
}

fn validate_meeting(
    days: &str,
    start: &str,
    duration: &str,
    label: &str,
) -> Result<Meeting, RowError> {
    let days = days.trim().to_uppercase();
    if !DAYS_RE.is_match(&days) {
        return Err(RowError::BadDays);
    }

    let start = start.trim();
    if !TIME_RE.is_match(start) {
        return Err(RowError::BadStart);
    }
    let start = to_minutes(start).ok_or(RowError::BadStart)?;

    let duration = duration.trim();
    if duration.is_empty() || !duration.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RowError::BadDuration);
    }
    let duration: i32 = duration.parse().map_err(|_| RowError::BadDuration)?;
    if duration <= 0 {
        return Err(RowError::BadDuration);
    }

    Ok(Meeting {
        days,
        start,
        duration,
        label: label.to_string(),
    })
}

/// Builds one `Section` from a raw row. If the lab flag is set, the lab
/// meeting is bundled into the same section; a set flag with any lab field
/// missing rejects the whole row, nothing is partially added.
pub fn section_from_row(row: &SectionRow) -> Result<Section, RowError> {
    let subject = row.subject.trim().to_uppercase();
    let number = row.number.trim();
    if !SUBJECT_RE.is_match(&subject) || !NUMBER_RE.is_match(number) {
        return Err(RowError::BadCourseCode);
    }
    let code = format!("{subject} {number}");

    let lecture = validate_meeting(&row.days, &row.start, &row.duration, &code)?;
    let mut meetings = vec![lecture];

    if is_truthy(&row.lab) {
        if row.lab_days.trim().is_empty()
            || row.lab_start.trim().is_empty()
            || row.lab_duration.trim().is_empty()
        {
            return Err(RowError::IncompleteLab);
        }
        let lab = validate_meeting(
            &row.lab_days,
            &row.lab_start,
            &row.lab_duration,
            &format!("{code} (Lab)"),
        )?;
        meetings.push(lab);
    }

    Ok(Section {
        course: code,
        meetings,
    })
}

/// Builds the catalog from raw rows. Bad rows are collected as rejects and
/// logged; good rows land as one section each under their course code.
pub fn build_catalog(rows: &[SectionRow]) -> (Catalog, Vec<RowReject>) {
    let mut catalog = Catalog::new();
    let mut rejects = Vec::new();

    for row in rows {
        match section_from_row(row) {
            Ok(section) => catalog.insert(section),
            Err(reason) => {
                let code = format!("{} {}", row.subject.trim().to_uppercase(), row.number.trim());
                warn!("Error in {code}: {reason}");
                rejects.push(RowReject { code, reason });
            }
        }
    }

    (catalog, rejects)
}
