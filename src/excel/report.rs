//! Reporting sink: the terminal top list and the results workbook.
//!
//! The workbook holds one sheet. Columns A..F are the heatmap (start
//! times against day columns, score cells tinted on a green/yellow/red
//! three-point scale); the ranked-range table starts at column H.

use std::path::Path;

use tracing::info;
use umya_spreadsheet::{HorizontalAlignmentValues, Style, VerticalAlignmentValues};

use crate::algorithm::grid::{BLOCK_LEN, STEP_MIN, day_name, to_hhmm};
use crate::algorithm::ranges::{MIN_SELECTED, RankedRange, SCORE_CUTOFF, ScoreMatrix};
use crate::error::ReportError;

const SHEET_NAME: &str = "ScheduleData";
/// First column of the ranked table (column H).
const TABLE_COL: u32 = 8;

const TABLE_HEADERS: [&str; 9] = [
    "Rank",
    "Day",
    "Start range",
    "End range",
    "Range length (starts)",
    "Score (conflicts)",
    "Conflicting courses",
    "# Blocked Courses",
    "Blocked courses",
];
const TABLE_WIDTHS: [f64; 9] = [6.0, 12.0, 16.0, 16.0, 20.0, 16.0, 35.0, 16.0, 120.0];

// Heat scale endpoints, low score to high.
const COLOR_LOW: (u8, u8, u8) = (0x63, 0xBE, 0x7B);
const COLOR_MID: (u8, u8, u8) = (0xFF, 0xEB, 0x84);
const COLOR_HIGH: (u8, u8, u8) = (0xF8, 0x69, 0x6B);

/// Formats a sorted list of starts as a compact span.
pub fn format_start_span(starts: &[i32]) -> String {
    match starts {
        [] => "(none)".to_string(),
        [only] => to_hhmm(*only),
        [first, .., last] => format!(
            "{}–{} (every {} min)",
            to_hhmm(*first),
            to_hhmm(*last),
            STEP_MIN
        ),
    }
}

/// Prints the selected ranges to stdout, one line per rank.
pub fn print_selected(selected: &[RankedRange]) {
    println!();
    println!("Meeting start-time ranges (contiguous, per-start optimized):");
    println!(
        "Includes all ranges with score <= {SCORE_CUTOFF}; if fewer than {MIN_SELECTED}, filled with next best ranges."
    );
    println!();

    for ranked in selected {
        let r = &ranked.range;
        let span = if r.first_start == r.last_start {
            to_hhmm(r.first_start)
        } else {
            format!("{}–{}", to_hhmm(r.first_start), to_hhmm(r.last_start))
        };
        println!(
            "{:2}. {:9}   start: {}    score={}",
            ranked.rank,
            day_name(r.day),
            span,
            r.score
        );
    }
}

/// Writes the heatmap sheet and ranked table to `path`.
pub fn write_report(
    path: &Path,
    matrix: &ScoreMatrix,
    selected: &[RankedRange],
) -> Result<(), ReportError> {
    let write_err = |message: String| ReportError::Write {
        path: path.display().to_string(),
        message,
    };

    let mut book = umya_spreadsheet::new_file();
    let sheet = book
        .get_sheet_by_name_mut("Sheet1")
        .ok_or_else(|| write_err("workbook has no default sheet".to_string()))?;
    sheet.set_name(SHEET_NAME);

    let max_score = matrix.scores.iter().flatten().copied().max().unwrap_or(0);

    // Heatmap header row.
    sheet.get_cell_mut((1, 1)).set_value("StartTime");
    emphasize(sheet.get_style_mut((1, 1)));
    sheet.get_column_dimension_mut("A").set_width(10.0);

    for (day_idx, &day) in matrix.days.iter().enumerate() {
        let col = 2 + day_idx as u32;
        sheet
            .get_cell_mut((col, 1))
            .set_value(format!("{} ({})", day, day_name(day)));
        emphasize(sheet.get_style_mut((col, 1)));
        sheet
            .get_column_dimension_mut(&column_letter(col))
            .set_width(14.0);
    }

    // Time rows and tinted score cells.
    for (start_idx, &start) in matrix.starts.iter().enumerate() {
        let row = 2 + start_idx as u32;
        sheet.get_cell_mut((1, row)).set_value(to_hhmm(start));
        center(sheet.get_style_mut((1, row)));

        for (day_idx, day_scores) in matrix.scores.iter().enumerate() {
            let Some(&score) = day_scores.get(start_idx) else {
                continue;
            };
            let col = 2 + day_idx as u32;
            sheet.get_cell_mut((col, row)).set_value_number(score as i32);
            let style = sheet.get_style_mut((col, row));
            style.set_background_color(heat_color(score, max_score));
            center(style);
        }
    }

    // Ranked table.
    for (offset, header) in TABLE_HEADERS.iter().enumerate() {
        let col = TABLE_COL + offset as u32;
        sheet.get_cell_mut((col, 1)).set_value(*header);
        emphasize(sheet.get_style_mut((col, 1)));
        sheet
            .get_column_dimension_mut(&column_letter(col))
            .set_width(TABLE_WIDTHS[offset]);
    }

    for ranked in selected {
        let r = &ranked.range;
        let row = 1 + ranked.rank as u32;
        let (start_range, end_range) = if r.first_start == r.last_start {
            (to_hhmm(r.first_start), to_hhmm(r.first_start + BLOCK_LEN))
        } else {
            (
                format!("{}–{}", to_hhmm(r.first_start), to_hhmm(r.last_start)),
                format!(
                    "{}–{}",
                    to_hhmm(r.first_start + BLOCK_LEN),
                    to_hhmm(r.last_start + BLOCK_LEN)
                ),
            )
        };

        let cells: [(u32, String); 9] = [
            (0, ranked.rank.to_string()),
            (1, day_name(r.day).to_string()),
            (2, start_range),
            (3, end_range),
            (4, r.count.to_string()),
            (5, r.score.to_string()),
            (6, r.conflicts.join(", ")),
            (7, r.blocked_count.to_string()),
            (8, r.blocked.join(", ")),
        ];
        for (offset, value) in cells {
            let col = TABLE_COL + offset;
            sheet.get_cell_mut((col, row)).set_value(value);
            center(sheet.get_style_mut((col, row)));
        }
    }

    umya_spreadsheet::writer::xlsx::write(&book, path)
        .map_err(|e| write_err(e.to_string()))?;
    info!("excel report written to {}", path.display());
    Ok(())
}

fn center(style: &mut Style) {
    let alignment = style.get_alignment_mut();
    alignment.set_horizontal(HorizontalAlignmentValues::Center);
    alignment.set_vertical(VerticalAlignmentValues::Center);
}

fn emphasize(style: &mut Style) {
    style.get_font_mut().set_bold(true);
    center(style);
}

/// ARGB fill for a score on the three-point scale. Zero is full green,
/// half the day's maximum is yellow, the maximum is red.
fn heat_color(score: usize, max_score: usize) -> String {
    if max_score == 0 {
        return argb(COLOR_LOW);
    }
    let t = score as f64 / max_score as f64;
    let (from, to, local) = if t <= 0.5 {
        (COLOR_LOW, COLOR_MID, t * 2.0)
    } else {
        (COLOR_MID, COLOR_HIGH, (t - 0.5) * 2.0)
    };
    argb((
        lerp(from.0, to.0, local),
        lerp(from.1, to.1, local),
        lerp(from.2, to.2, local),
    ))
}

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * t).round() as u8
}

fn argb((r, g, b): (u8, u8, u8)) -> String {
    format!("FF{r:02X}{g:02X}{b:02X}")
}

/// Converts a 1-based column index to its letter name (1 -> "A",
/// 27 -> "AA").
fn column_letter(mut col: u32) -> String {
    let mut out = String::new();
    while col > 0 {
        let rem = ((col - 1) % 26) as u8;
        out.insert(0, (b'A' + rem) as char);
        col = (col - 1) / 26;
    }
    out
}
