//! Score file parsing.
//!
//! Only the last data row of a score file counts; earlier rows are
//! superseded grading runs.

use crate::error::ScoreError;
use crate::models::ScoreRecord;
use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Names of the columns read from each score file.
#[derive(Debug, Clone)]
pub struct Columns {
    pub score: String,
    pub max: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self::from(&crate::config::ColumnConfig::default())
    }
}

impl From<&crate::config::ColumnConfig> for Columns {
    fn from(config: &crate::config::ColumnConfig) -> Self {
        Self {
            score: config.score.clone(),
            max: config.max.clone(),
        }
    }
}

/// Open a score file and return its last record.
pub fn parse_last_record(path: &Path, columns: &Columns) -> Result<ScoreRecord> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let record = read_last_record(file, path, columns)?;
    debug!(
        "{}: last record score={} max={}",
        path.display(),
        record.score,
        record.max
    );
    Ok(record)
}

/// Read CSV content and return its last record.
///
/// `path` is only used to label errors.
pub fn read_last_record<R: Read>(reader: R, path: &Path, columns: &Columns) -> Result<ScoreRecord> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Fields)
        .from_reader(reader);

    let headers = csv_reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .clone();
    let score_index = column_index(&headers, &columns.score, path)?;
    let max_index = column_index(&headers, &columns.max, path)?;

    let mut last = None;
    for row in csv_reader.records() {
        let row = row.with_context(|| format!("Failed to read {}", path.display()))?;
        last = Some(row);
    }

    let last = last.ok_or_else(|| ScoreError::EmptyScoreFile {
        path: path.to_path_buf(),
    })?;

    Ok(ScoreRecord {
        score: integer_field(&last, score_index, &columns.score, path)?,
        max: integer_field(&last, max_index, &columns.max, path)?,
    })
}

/// Position of a header; a repeated name resolves to its last occurrence.
fn column_index(headers: &StringRecord, column: &str, path: &Path) -> Result<usize, ScoreError> {
    headers
        .iter()
        .enumerate()
        .filter(|(_, name)| *name == column)
        .map(|(index, _)| index)
        .last()
        .ok_or_else(|| ScoreError::MissingColumn {
            path: path.to_path_buf(),
            column: column.to_string(),
        })
}

fn integer_field(
    row: &StringRecord,
    index: usize,
    column: &str,
    path: &Path,
) -> Result<i64, ScoreError> {
    let value = row.get(index).ok_or_else(|| ScoreError::MissingField {
        path: path.to_path_buf(),
        column: column.to_string(),
    })?;

    value.parse::<i64>().map_err(|_| ScoreError::InvalidInteger {
        path: path.to_path_buf(),
        column: column.to_string(),
        value: value.to_string(),
    })
}
