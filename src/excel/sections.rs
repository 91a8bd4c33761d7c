//! Section sheet loading.
//!
//! Expects columns `Subject, Number, Days, Start, Duration`, plus the
//! optional lab group `Lab, Lab_Days, Lab_Start, Lab_Duration`. The lab
//! group counts only when all four columns exist; otherwise every row is
//! treated as lab-less.

use std::path::Path;

use calamine::{Reader, open_workbook_auto};
use tracing::{debug, info};

use crate::catalog::is_truthy;
use crate::error::LoadError;
use crate::excel::io::{cell_to_string, normalize_duration_cell, normalize_header, read_csv_rows};

/// One raw input row, cells normalized but not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionRow {
    pub subject: String,
    pub number: String,
    pub days: String,
    pub start: String,
    pub duration: String,
    pub lab: String,
    pub lab_days: String,
    pub lab_start: String,
    pub lab_duration: String,
}

const REQUIRED_COLUMNS: [&str; 5] = ["Subject", "Number", "Days", "Start", "Duration"];
const LAB_COLUMNS: [&str; 4] = ["Lab", "Lab_Days", "Lab_Start", "Lab_Duration"];

/// Loads raw section rows from a `.xlsx`, `.xls`, or `.csv` file.
/// Missing required columns and unreadable files are fatal.
pub fn load_section_rows(path: &Path) -> Result<Vec<SectionRow>, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let rows: Vec<Vec<String>> = match ext.as_str() {
        "xlsx" | "xls" => read_workbook_rows(path)?,
        "csv" => read_csv_rows(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let parsed = rows_to_sections(rows)?;
    info!("read {} section rows from {}", parsed.len(), path.display());
    Ok(parsed)
}

/// Reads the first sheet of a workbook as rows of strings.
fn read_workbook_rows(path: &Path) -> Result<Vec<Vec<String>>, LoadError> {
    let workbook_err = |source| LoadError::Workbook {
        path: path.display().to_string(),
        source,
    };

    let mut workbook = open_workbook_auto(path).map_err(workbook_err)?;
    let sheet_names = workbook.sheet_names().to_owned();
    let first = sheet_names.first().cloned().ok_or(LoadError::NoSheet)?;
    debug!("reading sheet '{first}'");

    let range = workbook.worksheet_range(&first).map_err(workbook_err)?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

/// Maps the header row to column indices and extracts `SectionRow`s.
fn rows_to_sections(rows: Vec<Vec<String>>) -> Result<Vec<SectionRow>, LoadError> {
    let mut rows = rows.into_iter();
    let header = rows.next().unwrap_or_default();
    let normalized: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();
    let find = |name: &str| normalized.iter().position(|h| *h == normalize_header(name));

    let mut required = [0usize; 5];
    let mut missing: Vec<&str> = Vec::new();
    for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
        match find(name) {
            Some(idx) => *slot = idx,
            None => missing.push(name),
        }
    }
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns(missing.join(", ")));
    }

    // The lab group is all-or-nothing.
    let lab_indices: Option<Vec<usize>> = LAB_COLUMNS.into_iter().map(|name| find(name)).collect();

    let [subject_i, number_i, days_i, start_i, duration_i] = required;
    let mut out = Vec::new();
    for row in rows {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        let cell = |i: usize| row.get(i).map(String::as_str).unwrap_or("").trim().to_string();

        let mut section_row = SectionRow {
            subject: cell(subject_i).to_uppercase(),
            number: cell(number_i),
            days: cell(days_i).to_uppercase(),
            start: cell(start_i),
            duration: normalize_duration_cell(&cell(duration_i)),
            ..SectionRow::default()
        };

        if let Some(lab) = &lab_indices {
            let flag = cell(lab[0]).to_uppercase();
            section_row.lab = flag.clone();
            // Lab detail is only captured when the flag is set.
            if is_truthy(&flag) {
                section_row.lab_days = cell(lab[1]).to_uppercase();
                section_row.lab_start = cell(lab[2]);
                section_row.lab_duration = normalize_duration_cell(&cell(lab[3]));
            }
        }

        out.push(section_row);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    #[test]
    fn missing_required_columns_is_fatal() {
        let rows = sheet(&[&["Subject", "Number", "Days"], &["MEEN", "221", "MWF"]]);
        match rows_to_sections(rows) {
            Err(LoadError::MissingColumns(cols)) => assert_eq!(cols, "Start, Duration"),
            other => panic!("expected MissingColumns, got {other:?}"),
        }
    }

    #[test]
    fn rows_extract_with_uppercasing_and_coercion() {
        let rows = sheet(&[
            &["Subject", "Number", "Days", "Start", "Duration"],
            &["meen", "221", "mwf", "09:10", "50.0"],
            &["", "", "", "", ""],
        ]);
        let parsed = rows_to_sections(rows).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].subject, "MEEN");
        assert_eq!(parsed[0].days, "MWF");
        assert_eq!(parsed[0].duration, "50");
        assert_eq!(parsed[0].lab, "");
    }

    #[test]
    fn partial_lab_column_group_means_no_labs() {
        let rows = sheet(&[
            &["Subject", "Number", "Days", "Start", "Duration", "Lab"],
            &["CHEM", "107", "MW", "10:20", "50", "Y"],
        ]);
        let parsed = rows_to_sections(rows).unwrap();
        // "Lab" alone is not enough; the flag cell is dropped entirely.
        assert_eq!(parsed[0].lab, "");
        assert_eq!(parsed[0].lab_days, "");
    }

    #[test]
    fn lab_detail_is_only_captured_when_flagged() {
        let rows = sheet(&[
            &[
                "Subject", "Number", "Days", "Start", "Duration", "Lab", "Lab_Days", "Lab_Start",
                "Lab_Duration",
            ],
            &["CHEM", "107", "MW", "10:20", "50", "Y", "r", "14:00", "170.0"],
            &["MEEN", "221", "MWF", "09:10", "50", "N", "r", "14:00", "170"],
        ]);
        let parsed = rows_to_sections(rows).unwrap();
        assert_eq!(parsed[0].lab, "Y");
        assert_eq!(parsed[0].lab_days, "R");
        assert_eq!(parsed[0].lab_duration, "170");
        assert_eq!(parsed[1].lab, "N");
        assert_eq!(parsed[1].lab_days, "");
    }
}
