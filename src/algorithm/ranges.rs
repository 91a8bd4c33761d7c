//! Grid sweep, contiguous-range grouping, ranking, and selection.

use serde::Serialize;

use crate::algorithm::conflict::{BlockReport, evaluate_block};
use crate::algorithm::grid::{DAY_LETTERS, STEP_MIN, candidate_starts, day_index};
use crate::models::Catalog;

/// Ranges scoring at or below this are always reported.
pub const SCORE_CUTOFF: usize = 2;
/// The selection is padded with next-best ranges up to this many rows.
pub const MIN_SELECTED: usize = 10;

/// Full day x start score matrix, the heatmap input.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreMatrix {
    /// Day letters in week order.
    pub days: Vec<char>,
    /// Candidate starts in ascending order.
    pub starts: Vec<i32>,
    /// `scores[day][start]`, indexed parallel to `days` and `starts`.
    pub scores: Vec<Vec<usize>>,
}

/// A maximal run of contiguous candidate starts on one day sharing one
/// score.
///
/// `conflicts`, `blocked_count` and `blocked` are the detail of the run's
/// first start, used as representative for the whole run. Scores are equal
/// across the run by construction; the specific course identities behind
/// them may drift between interior starts. That simplification is
/// deliberate and kept.
#[derive(Debug, Clone, Serialize)]
pub struct Range {
    pub score: usize,
    pub day: char,
    pub first_start: i32,
    pub last_start: i32,
    /// Number of starts in the run.
    pub count: usize,
    pub conflicts: Vec<String>,
    pub blocked_count: usize,
    pub blocked: Vec<String>,
}

/// A selected range with its 1-based report position.
#[derive(Debug, Clone, Serialize)]
pub struct RankedRange {
    pub rank: usize,
    pub range: Range,
}

/// Evaluates every candidate block, day-major in week order, starts
/// ascending within each day.
pub fn sweep_grid(catalog: &Catalog) -> Vec<BlockReport> {
    let mut reports = Vec::new();
    for &day in DAY_LETTERS.iter() {
        for start in candidate_starts() {
            reports.push(evaluate_block(catalog, day, start));
        }
    }
    reports
}

/// Collects swept reports into the heatmap matrix. Expects reports in the
/// order `sweep_grid` produces them.
pub fn score_matrix(reports: &[BlockReport]) -> ScoreMatrix {
    let starts: Vec<i32> = candidate_starts().collect();
    let mut scores: Vec<Vec<usize>> = vec![Vec::with_capacity(starts.len()); DAY_LETTERS.len()];
    for report in reports {
        let idx = day_index(report.day);
        if idx < scores.len() {
            scores[idx].push(report.score);
        }
    }
    ScoreMatrix {
        days: DAY_LETTERS.to_vec(),
        starts,
        scores,
    }
}

/// Groups each day's reports into maximal contiguous same-score runs.
/// Every start lands in exactly one range.
pub fn group_ranges(reports: &[BlockReport]) -> Vec<Range> {
    let mut ranges: Vec<Range> = Vec::new();

    for &day in DAY_LETTERS.iter() {
        let mut day_reports: Vec<&BlockReport> =
            reports.iter().filter(|r| r.day == day).collect();
        day_reports.sort_by_key(|r| r.start);

        let mut run: Option<Range> = None;
        for report in day_reports {
            match run.as_mut() {
                Some(open)
                    if open.score == report.score
                        && report.start == open.last_start + STEP_MIN =>
                {
                    open.last_start = report.start;
                    open.count += 1;
                }
                _ => {
                    if let Some(done) = run.take() {
                        ranges.push(done);
                    }
                    run = Some(Range {
                        score: report.score,
                        day,
                        first_start: report.start,
                        last_start: report.start,
                        count: 1,
                        conflicts: report.conflicts.clone(),
                        blocked_count: report.blocked.len(),
                        blocked: report.blocked.clone(),
                    });
                }
            }
        }
        if let Some(done) = run.take() {
            ranges.push(done);
        }
    }

    ranges
}

/// Sorts ranges ascending by (score, blocked count, first start, day
/// order). Earlier is better.
pub fn rank_ranges(mut ranges: Vec<Range>) -> Vec<Range> {
    ranges.sort_by_key(|r| (r.score, r.blocked_count, r.first_start, day_index(r.day)));
    ranges
}

/// Applies the selection rule to ranked ranges: keep everything scoring at
/// most `SCORE_CUTOFF`; if that yields fewer than `MIN_SELECTED` rows, pad
/// with the next best ranges until the floor is met or ranges run out.
pub fn select_top(ranked: Vec<Range>) -> Vec<RankedRange> {
    let mut selected: Vec<Range> = Vec::new();
    let mut extras: Vec<Range> = Vec::new();
    for range in ranked {
        if range.score <= SCORE_CUTOFF {
            selected.push(range);
        } else {
            extras.push(range);
        }
    }

    let mut extras = extras.into_iter();
    while selected.len() < MIN_SELECTED {
        match extras.next() {
            Some(range) => selected.push(range),
            None => break,
        }
    }

    selected
        .into_iter()
        .enumerate()
        .map(|(i, range)| RankedRange { rank: i + 1, range })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(day: char, start: i32, score: usize) -> BlockReport {
        BlockReport {
            day,
            start,
            score,
            conflicts: vec![format!("CRSE {:03}", score)],
            blocked: Vec::new(),
        }
    }

    #[test]
    fn grouping_splits_on_score_change() {
        let reports: Vec<BlockReport> = candidate_starts()
            .map(|s| report('M', s, if s < 600 { 0 } else { 1 }))
            .collect();

        let ranges = group_ranges(&reports);
        assert_eq!(ranges.len(), 2);
        assert_eq!(ranges[0].score, 0);
        assert_eq!(ranges[0].first_start, 480);
        assert_eq!(ranges[0].last_start, 595);
        assert_eq!(ranges[1].score, 1);
        assert_eq!(ranges[1].first_start, 600);
        assert_eq!(ranges[1].last_start, 970);
        let total: usize = ranges.iter().map(|r| r.count).sum();
        assert_eq!(total, 99);
    }

    #[test]
    fn range_detail_comes_from_first_start() {
        let mut reports = vec![report('M', 480, 1), report('M', 485, 1)];
        reports[0].conflicts = vec!["AAAA 111".to_string()];
        reports[1].conflicts = vec!["BBBB 222".to_string()];

        let ranges = group_ranges(&reports);
        assert_eq!(ranges.len(), 1);
        assert_eq!(ranges[0].conflicts, vec!["AAAA 111".to_string()]);
    }

    #[test]
    fn ranking_orders_by_all_four_keys() {
        let mk = |score, blocked_count, first_start, day| Range {
            score,
            day,
            first_start,
            last_start: first_start,
            count: 1,
            conflicts: Vec::new(),
            blocked_count,
            blocked: Vec::new(),
        };

        let ranked = rank_ranges(vec![
            mk(1, 0, 480, 'M'),
            mk(0, 2, 480, 'M'),
            mk(0, 1, 600, 'F'),
            mk(0, 1, 480, 'W'),
            mk(0, 1, 480, 'T'),
        ]);

        let keys: Vec<(usize, usize, i32, char)> = ranked
            .iter()
            .map(|r| (r.score, r.blocked_count, r.first_start, r.day))
            .collect();
        assert_eq!(
            keys,
            vec![
                (0, 1, 480, 'T'),
                (0, 1, 480, 'W'),
                (0, 1, 600, 'F'),
                (0, 2, 480, 'M'),
                (1, 0, 480, 'M'),
            ]
        );
    }

    #[test]
    fn selection_pads_to_floor_with_next_best() {
        let mk = |score, first_start| Range {
            score,
            day: 'M',
            first_start,
            last_start: first_start,
            count: 1,
            conflicts: Vec::new(),
            blocked_count: 0,
            blocked: Vec::new(),
        };

        // 4 qualifying ranges, 8 above the cutoff.
        let mut ranges: Vec<Range> = (0..4).map(|i| mk(i as usize / 2, 480 + i * 5)).collect();
        ranges.extend((0..8).map(|i| mk(3 + i as usize, 700 + i * 5)));
        let selected = select_top(rank_ranges(ranges));

        assert_eq!(selected.len(), MIN_SELECTED);
        assert!(selected[..4].iter().all(|r| r.range.score <= SCORE_CUTOFF));
        assert!(selected[4..].iter().all(|r| r.range.score > SCORE_CUTOFF));
        let ranks: Vec<usize> = selected.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, (1..=MIN_SELECTED).collect::<Vec<_>>());
    }

    #[test]
    fn selection_keeps_every_qualifying_range_past_the_floor() {
        let mk = |first_start| Range {
            score: 1,
            day: 'M',
            first_start,
            last_start: first_start,
            count: 1,
            conflicts: Vec::new(),
            blocked_count: 0,
            blocked: Vec::new(),
        };

        let mut ranges: Vec<Range> = (0..12).map(|i| mk(480 + i * 5)).collect();
        // A worse range must not ride along once the floor is met.
        let mut worse = mk(900);
        worse.score = 5;
        ranges.push(worse);

        let selected = select_top(rank_ranges(ranges));
        assert_eq!(selected.len(), 12);
        assert!(selected.iter().all(|r| r.range.score <= SCORE_CUTOFF));
    }
}
