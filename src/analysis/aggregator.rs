//! Course total aggregation.
//!
//! Each score file contributes its last record to the course totals and
//! one report line. Lines are written as files are processed, so a bad
//! file stops the run after the tasks before it have been printed.

use crate::models::{CourseTotals, ScoreFile, TaskScore};
use crate::parser::{parse_last_record, Columns};
use crate::report;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::{debug, info};

/// Aggregate `files` in order, writing the report to `out`.
pub fn run<W: Write>(files: &[ScoreFile], columns: &Columns, out: &mut W) -> Result<CourseTotals> {
    let mut totals = CourseTotals::default();

    for file in files {
        let record = parse_last_record(&file.path, columns)?;
        totals.add(&record)?;

        let task = TaskScore {
            task: file.task.clone(),
            record,
        };
        let percentage = task.percentage()?;
        debug!("Task {:?}: {}%", task.task, percentage);

        writeln!(out, "{}", report::task_line(&task, percentage))
            .context("Failed to write report")?;
    }

    // Computed before the separator so an empty or zero-max run prints no total
    let percentage = totals.percentage()?;

    writeln!(out, "{}", report::separator()).context("Failed to write report")?;
    writeln!(out, "{}", report::total_line(&totals, percentage))
        .context("Failed to write report")?;

    info!(
        "Aggregated {} score files: {}/{}",
        files.len(),
        totals.total_score,
        totals.total_max
    );
    Ok(totals)
}
