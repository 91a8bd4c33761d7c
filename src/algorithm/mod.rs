//! Algorithmic core, split into submodules:
//! - `grid`: candidate time grid constants and interval arithmetic
//! - `conflict`: per-block conflict/blocked evaluation
//! - `ranges`: grid sweep, contiguous-range grouping, ranking, selection

pub mod conflict;
pub mod grid;
pub mod ranges;

pub use conflict::{BlockReport, evaluate_block};
pub use ranges::{
    Range, RankedRange, ScoreMatrix, group_ranges, rank_ranges, score_matrix, select_top,
    sweep_grid,
};
