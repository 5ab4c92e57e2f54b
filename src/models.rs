//! Data models for score aggregation.
//!
//! This module contains the core data structures passed between the
//! scanner, the parser and the report writer.

use crate::error::ScoreError;
use std::path::PathBuf;

/// A score report discovered under the scan root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreFile {
    /// Path used to open the file.
    pub path: PathBuf,
    /// Path relative to the scan root.
    pub relative_path: PathBuf,
    /// Directory segments between the root and the file, joined with `/`.
    pub task: String,
}

/// One row of a score report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreRecord {
    /// Points earned.
    pub score: i64,
    /// Points possible.
    pub max: i64,
}

/// The last record of one score file, labelled with its task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskScore {
    pub task: String,
    pub record: ScoreRecord,
}

impl TaskScore {
    /// Truncating percentage of this task's score.
    pub fn percentage(&self) -> Result<i64, ScoreError> {
        percentage(self.record.score, self.record.max, &format!("task `{}`", self.task))
    }
}

/// Running course totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CourseTotals {
    pub total_score: i64,
    pub total_max: i64,
}

impl CourseTotals {
    /// Add one task's last record to the totals.
    pub fn add(&mut self, record: &ScoreRecord) -> Result<(), ScoreError> {
        let overflow = || ScoreError::Overflow {
            what: "course totals".to_string(),
        };
        self.total_score = self.total_score.checked_add(record.score).ok_or_else(overflow)?;
        self.total_max = self.total_max.checked_add(record.max).ok_or_else(overflow)?;
        Ok(())
    }

    /// Truncating percentage of the course total.
    pub fn percentage(&self) -> Result<i64, ScoreError> {
        percentage(self.total_score, self.total_max, "course total")
    }
}

/// `100 * score / max`, truncated toward zero.
pub fn percentage(score: i64, max: i64, what: &str) -> Result<i64, ScoreError> {
    if max == 0 {
        return Err(ScoreError::ZeroMax {
            what: what.to_string(),
        });
    }
    let scaled = score.checked_mul(100).ok_or_else(|| ScoreError::Overflow {
        what: format!("percentage for {}", what),
    })?;
    scaled.checked_div(max).ok_or_else(|| ScoreError::Overflow {
        what: format!("percentage for {}", what),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(score: i64, max: i64) -> ScoreRecord {
        ScoreRecord { score, max }
    }

    #[test]
    fn test_percentage_truncates() {
        assert_eq!(percentage(7, 10, "t").unwrap(), 70);
        assert_eq!(percentage(0, 5, "t").unwrap(), 0);
        assert_eq!(percentage(8, 9, "t").unwrap(), 88);
        assert_eq!(percentage(2, 3, "t").unwrap(), 66);
        assert_eq!(percentage(11, 10, "t").unwrap(), 110);
    }

    #[test]
    fn test_percentage_truncates_toward_zero_for_negatives() {
        assert_eq!(percentage(-1, 3, "t").unwrap(), -33);
    }

    #[test]
    fn test_percentage_zero_max_fails() {
        let err = percentage(3, 0, "task `a`").unwrap_err();
        assert!(matches!(err, ScoreError::ZeroMax { .. }));
    }

    #[test]
    fn test_percentage_overflow_fails() {
        let err = percentage(i64::MAX, 1, "t").unwrap_err();
        assert!(matches!(err, ScoreError::Overflow { .. }));
    }

    #[test]
    fn test_course_totals_sum() {
        let mut totals = CourseTotals::default();
        for r in [record(5, 5), record(3, 4), record(0, 7)] {
            totals.add(&r).unwrap();
        }
        assert_eq!(totals.total_score, 8);
        assert_eq!(totals.total_max, 16);
        assert_eq!(totals.percentage().unwrap(), 50);
    }

    #[test]
    fn test_empty_totals_fail_percentage() {
        let totals = CourseTotals::default();
        assert!(matches!(
            totals.percentage(),
            Err(ScoreError::ZeroMax { .. })
        ));
    }

    #[test]
    fn test_task_score_percentage() {
        let task = TaskScore {
            task: "algebra".to_string(),
            record: record(7, 10),
        };
        assert_eq!(task.percentage().unwrap(), 70);
    }
}
