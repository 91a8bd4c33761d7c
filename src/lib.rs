//! quickslot finds the lowest-conflict 100-minute meeting windows in a
//! fixed weekly grid, given a sheet of course sections where each course
//! offers interchangeable lecture(+lab) bundles.
//!
//! Modules:
//! - `models`: meetings, section bundles, the course catalog
//! - `catalog`: row validation and catalog construction
//! - `algorithm`: time grid, conflict evaluation, range aggregation
//! - `excel`: section sheet reading and report rendering
//! - `error`: error taxonomy

pub mod algorithm;
pub mod catalog;
pub mod error;
pub mod excel;
pub mod models;

use std::path::PathBuf;

use tracing::{debug, info};

use crate::algorithm::grid::{self, DAY_LETTERS};
use crate::algorithm::ranges;
use crate::error::Error;
use crate::models::Catalog;

/// Input file tried when no path argument is given.
pub const DEFAULT_INPUT: &str = "sections.xlsx";
/// Workbook written next to the working directory by default.
pub const DEFAULT_OUTPUT: &str = "quickslot_results.xlsx";

/// Explicit run configuration. Paths are always passed in; nothing is
/// read from module state.
#[derive(Debug, Clone)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Full pipeline: load rows, build the catalog, sweep the grid, print the
/// top ranges, and write the workbook.
pub fn run(config: &Config) -> Result<(), Error> {
    let rows = excel::load_section_rows(&config.input)?;
    let (catalog, rejects) = catalog::build_catalog(&rows);
    if catalog.is_empty() {
        return Err(Error::EmptyCatalog);
    }
    info!(
        "loaded {} section rows across {} courses ({} rejected) from {}",
        rows.len() - rejects.len(),
        catalog.len(),
        rejects.len(),
        config.input.display()
    );

    log_free_time(&catalog);

    let reports = ranges::sweep_grid(&catalog);
    let matrix = ranges::score_matrix(&reports);
    let selected = ranges::select_top(ranges::rank_ranges(ranges::group_ranges(&reports)));

    excel::report::print_selected(&selected);
    excel::report::write_report(&config.output, &matrix, &selected)?;
    Ok(())
}

/// Auxiliary diagnostic: per day, the candidate starts whose whole block
/// misses every meeting of every section.
fn log_free_time(catalog: &Catalog) {
    for &day in DAY_LETTERS.iter() {
        let mut busy: Vec<(i32, i32)> = Vec::new();
        for (_, sections) in catalog.iter() {
            for section in sections {
                for meeting in &section.meetings {
                    if meeting.meets_on(day) {
                        busy.push(meeting.interval());
                    }
                }
            }
        }
        let merged = grid::merge_intervals(busy);
        let free = grid::free_starts(&merged);
        debug!(
            "{}: fully open starts {}",
            grid::day_name(day),
            excel::report::format_start_span(&free)
        );
    }
}
