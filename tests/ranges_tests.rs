use std::collections::BTreeSet;

use quickslot::algorithm::grid::{DAY_LETTERS, STEP_MIN, candidate_starts};
use quickslot::algorithm::{group_ranges, rank_ranges, score_matrix, select_top, sweep_grid};
use quickslot::models::{Catalog, Meeting, Section};

fn section(course: &str, slots: &[(&str, i32, i32)]) -> Section {
    let meetings = slots
        .iter()
        .map(|&(days, start, duration)| Meeting {
            days: days.to_string(),
            start,
            duration,
            label: course.to_string(),
        })
        .collect();
    Section {
        course: course.to_string(),
        meetings,
    }
}

fn one_course_catalog() -> Catalog {
    // Single option Monday 09:00-09:50; every other day stays clear.
    let mut catalog = Catalog::new();
    catalog.insert(section("MEEN 221", &[("M", 540, 50)]));
    catalog
}

#[test]
fn ranges_partition_each_day_of_the_grid() {
    let reports = sweep_grid(&one_course_catalog());
    let ranges = group_ranges(&reports);

    for &day in DAY_LETTERS.iter() {
        let mut seen: BTreeSet<i32> = BTreeSet::new();
        for range in ranges.iter().filter(|r| r.day == day) {
            let mut start = range.first_start;
            while start <= range.last_start {
                assert!(seen.insert(start), "start {start} in two ranges on {day}");
                start += STEP_MIN;
            }
            assert_eq!(
                range.count as i32,
                (range.last_start - range.first_start) / STEP_MIN + 1
            );
        }
        let grid: BTreeSet<i32> = candidate_starts().collect();
        assert_eq!(seen, grid, "day {day} not fully covered");
    }
}

#[test]
fn monday_splits_around_the_busy_meeting() {
    let reports = sweep_grid(&one_course_catalog());
    let ranges = group_ranges(&reports);

    let monday: Vec<_> = ranges.iter().filter(|r| r.day == 'M').collect();
    assert_eq!(monday.len(), 2);
    // Blocks starting 08:00 through 09:45 clip the 09:00-09:50 meeting.
    assert_eq!(monday[0].score, 1);
    assert_eq!(monday[0].first_start, 480);
    assert_eq!(monday[0].last_start, 585);
    assert_eq!(monday[0].conflicts, vec!["MEEN 221".to_string()]);
    assert_eq!(monday[1].score, 0);
    assert_eq!(monday[1].first_start, 590);
    assert_eq!(monday[1].last_start, 970);
}

#[test]
fn ranking_prefers_low_score_then_early_start_then_day_order() {
    let reports = sweep_grid(&one_course_catalog());
    let ranked = rank_ranges(group_ranges(&reports));

    // Four whole-day zero ranges (T W R F), then Monday's zero tail,
    // then Monday's conflicting morning.
    let summary: Vec<(usize, char, i32)> = ranked
        .iter()
        .map(|r| (r.score, r.day, r.first_start))
        .collect();
    assert_eq!(
        summary,
        vec![
            (0, 'T', 480),
            (0, 'W', 480),
            (0, 'R', 480),
            (0, 'F', 480),
            (0, 'M', 590),
            (1, 'M', 480),
        ]
    );
}

#[test]
fn selection_reports_every_low_score_range_with_ranks() {
    let reports = sweep_grid(&one_course_catalog());
    let selected = select_top(rank_ranges(group_ranges(&reports)));

    // All six ranges score <= 2, so all are kept even though that is
    // fewer than the padding floor.
    assert_eq!(selected.len(), 6);
    let ranks: Vec<usize> = selected.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(selected[0].range.day, 'T');
    assert_eq!(selected[5].range.score, 1);
}

#[test]
fn blocked_count_breaks_score_ties() {
    // Two courses: one single-option on Monday (conflict band), one
    // two-option pair on Tuesday (blocked band, score stays 0).
    let mut catalog = Catalog::new();
    catalog.insert(section("AAAA 101", &[("M", 540, 50)]));
    catalog.insert(section("BBBB 202", &[("T", 540, 50)]));
    catalog.insert(section("BBBB 202", &[("T", 780, 50)]));

    let ranked = rank_ranges(group_ranges(&sweep_grid(&catalog)));

    // Among score-0 ranges, zero-blocked ranges come before Tuesday's
    // blocked bands.
    let zero: Vec<_> = ranked.iter().filter(|r| r.score == 0).collect();
    let first_blocked = zero.iter().position(|r| r.blocked_count > 0).unwrap();
    assert!(zero[..first_blocked].iter().all(|r| r.blocked_count == 0));
    assert!(zero[first_blocked..].iter().any(|r| r.day == 'T'));
}

#[test]
fn score_matrix_covers_the_full_grid() {
    let reports = sweep_grid(&one_course_catalog());
    let matrix = score_matrix(&reports);

    assert_eq!(matrix.days, DAY_LETTERS.to_vec());
    assert_eq!(matrix.starts.len(), 99);
    assert_eq!(matrix.scores.len(), 5);
    for day_scores in &matrix.scores {
        assert_eq!(day_scores.len(), 99);
    }

    // Monday 09:00 block collides; Tuesday same slot does not.
    let monday_0900 = matrix.starts.iter().position(|&s| s == 540).unwrap();
    assert_eq!(matrix.scores[0][monday_0900], 1);
    assert_eq!(matrix.scores[1][monday_0900], 0);
}
