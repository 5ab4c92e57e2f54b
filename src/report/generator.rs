//! Plain-text report lines.
//!
//! The formats here are the program's entire output surface; they are
//! kept byte-for-byte stable.

use crate::models::{CourseTotals, TaskScore};

/// Width of the line separating tasks from the course total.
pub const SEPARATOR_WIDTH: usize = 28;

/// `task: {task}, score: {score}/{max} ({percentage}%)`
pub fn task_line(task: &TaskScore, percentage: i64) -> String {
    format!(
        "task: {}, score: {}/{} ({}%)",
        task.task, task.record.score, task.record.max, percentage
    )
}

/// A row of `=` characters.
pub fn separator() -> String {
    "=".repeat(SEPARATOR_WIDTH)
}

/// `total: {score}/{max} ({percentage}%)`
pub fn total_line(totals: &CourseTotals, percentage: i64) -> String {
    format!(
        "total: {}/{} ({}%)",
        totals.total_score, totals.total_max, percentage
    )
}
