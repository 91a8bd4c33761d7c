//! Cell and header plumbing shared by the spreadsheet readers.

use std::path::Path;

use calamine::Data;

/// Converts a calamine `Data` cell to a trimmed string. Whole floats
/// render without the trailing `.0`, so numeric cells like `50.0` come
/// out as `"50"`.
pub fn cell_to_string(c: &Data) -> String {
    match c {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => {
            if (f.floor() - f).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                format!("{}", f)
            }
        }
        Data::Int(i) => format!("{}", i),
        Data::Bool(b) => format!("{}", b),
        Data::Empty => String::new(),
        Data::Error(_) => String::new(),
        Data::DateTime(s) => s.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Normalizes a header for column matching: lowercase, whitespace
/// stripped, underscores kept.
pub fn normalize_header(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Coerces a numeric-looking cell to an integer string ("50.0" -> "50").
/// Anything else passes through untouched; validation decides its fate.
pub fn normalize_duration_cell(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.contains('.') {
        if let Ok(value) = trimmed.parse::<f64>() {
            if value.fract() == 0.0 {
                return format!("{}", value as i64);
            }
        }
    }
    trimmed.to_string()
}

/// Reads a `.csv` file into rows of trimmed cells. Blank lines are
/// skipped. Fields may be double-quoted; quoted commas and doubled quotes
/// are honored. Embedded newlines are not supported by the section sheets
/// this tool consumes.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, std::io::Error> {
    let text = std::fs::read_to_string(path)?;
    Ok(text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(parse_csv_line)
        .collect())
}

fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                field.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(field.trim().to_string());
                field = String::new();
            }
            _ => field.push(c),
        }
    }
    fields.push(field.trim().to_string());
    fields
}
