//! The candidate time grid and minute-interval arithmetic.
//!
//! Candidate meeting blocks are 100 minutes long and may start every
//! 5 minutes between 08:00 and 16:10 inclusive, on any weekday.

/// Weekday letters in week order.
pub const DAY_LETTERS: [char; 5] = ['M', 'T', 'W', 'R', 'F'];

/// First candidate start, minutes from midnight (08:00).
pub const GRID_START: i32 = 8 * 60;
/// Last candidate start, inclusive (16:10).
pub const GRID_END: i32 = 16 * 60 + 10;
/// Candidate block length in minutes.
pub const BLOCK_LEN: i32 = 100;
/// Spacing between candidate starts in minutes.
pub const STEP_MIN: i32 = 5;

/// Full weekday name for a day letter.
pub fn day_name(day: char) -> &'static str {
    match day {
        'M' => "Monday",
        'T' => "Tuesday",
        'W' => "Wednesday",
        'R' => "Thursday",
        'F' => "Friday",
        _ => "?",
    }
}

/// Position of a day letter in week order. Unknown letters sort last.
pub fn day_index(day: char) -> usize {
    DAY_LETTERS
        .iter()
        .position(|&d| d == day)
        .unwrap_or(DAY_LETTERS.len())
}

/// All candidate start minutes in ascending order.
pub fn candidate_starts() -> impl Iterator<Item = i32> {
    (GRID_START..=GRID_END).step_by(STEP_MIN as usize)
}

/// Parses "HH:MM" into minutes from midnight.
pub fn to_minutes(hhmm: &str) -> Option<i32> {
    let (hh, mm) = hhmm.split_once(':')?;
    let hh: i32 = hh.parse().ok()?;
    let mm: i32 = mm.parse().ok()?;
    if !(0..24).contains(&hh) || !(0..60).contains(&mm) {
        return None;
    }
    Some(hh * 60 + mm)
}

/// Renders minutes from midnight as "HH:MM".
pub fn to_hhmm(minutes: i32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Whether two half-open minute intervals overlap. A shared endpoint is
/// not an overlap.
#[inline]
pub fn overlaps(a: (i32, i32), b: (i32, i32)) -> bool {
    a.0.max(b.0) < a.1.min(b.1)
}

/// Folds a set of intervals into a minimal sorted set of disjoint spans.
/// Overlapping and touching intervals are merged.
pub fn merge_intervals(mut intervals: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    intervals.sort_unstable();
    let mut merged: Vec<(i32, i32)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

/// Candidate starts whose full block overlaps none of the given busy
/// intervals. Used for auxiliary free-time reporting only; conflict
/// scoring works per course, not on this union.
pub fn free_starts(busy: &[(i32, i32)]) -> Vec<i32> {
    candidate_starts()
        .filter(|&start| {
            let block = (start, start + BLOCK_LEN);
            !busy.iter().any(|&interval| overlaps(block, interval))
        })
        .collect()
}
