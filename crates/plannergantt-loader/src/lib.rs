//! # plannergantt-loader
//!
//! Loading and normalization of Planner exports.
//!
//! This crate provides:
//! - Format detection by extension (flat CSV, or an XLSX/XLS workbook with a
//!   required `Tasks` sheet)
//! - Assembly of raw export rows from the recognized columns
//! - Per-row schedule normalization via `plannergantt-core`
//! - Bucket exclusion by shell-style glob patterns
//! - The final display ordering of the task table
//!
//! ## Example
//!
//! ```rust,no_run
//! use plannergantt_loader::load_tasks;
//!
//! let tasks = load_tasks("export.csv".as_ref(), &[]).unwrap();
//! assert!(tasks.windows(2).all(|w| w[0].start <= w[1].start));
//! ```

pub mod delimited;
pub mod glob;
pub mod workbook;

use std::path::{Path, PathBuf};

use plannergantt_core::{normalize, RawTask, Task};
use thiserror::Error;

/// Name of the worksheet a Planner workbook export must contain
pub const TASKS_SHEET: &str = "Tasks";

/// Loading error. All variants are fatal; malformed individual cells are
/// not errors (they normalize to absent values instead).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Input not found: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("Worksheet '{sheet}' not found in {file}")]
    MissingSheet { sheet: String, file: String },

    #[error("No tasks with schedule info found in Planner export")]
    EmptyResult,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Workbook error: {0}")]
    Workbook(#[from] calamine::Error),
}

/// Supported physical formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Flat delimited text (.csv)
    Delimited,
    /// Structured workbook (.xlsx / .xls)
    Workbook,
}

/// Detect the physical format from the file extension
pub fn detect_format(path: &Path) -> Result<FileFormat, LoadError> {
    let suffix = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase);

    match suffix.as_deref() {
        Some("csv") => Ok(FileFormat::Delimited),
        Some("xlsx") | Some("xls") => Ok(FileFormat::Workbook),
        Some(other) => Err(LoadError::UnsupportedFormat(format!(".{other}"))),
        None => Err(LoadError::UnsupportedFormat("unknown".to_string())),
    }
}

/// Load, normalize, filter and order a Planner export.
///
/// Rows without a resolvable schedule are dropped silently; buckets matching
/// any exclusion pattern are removed after schedule derivation. An empty
/// surviving table is fatal (`LoadError::EmptyResult`).
pub fn load_tasks(path: &Path, exclude_buckets: &[String]) -> Result<Vec<Task>, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound(path.to_path_buf()));
    }

    let rows = match detect_format(path)? {
        FileFormat::Delimited => delimited::read(path)?,
        FileFormat::Workbook => workbook::read(path)?,
    };

    let mut tasks: Vec<Task> = rows.iter().filter_map(|raw| normalize(raw).ok()).collect();
    tasks.retain(|task| !is_excluded(&task.bucket, exclude_buckets));
    sort_for_display(&mut tasks);

    if tasks.is_empty() {
        return Err(LoadError::EmptyResult);
    }
    Ok(tasks)
}

/// Case-sensitive glob test of a bucket name against the exclusion patterns
pub fn is_excluded(bucket: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|p| glob::glob_match(p, bucket))
}

/// Sort ascending by `(start, finish, name)`; the sort is stable, so exact
/// ties keep their original row order
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.finish.cmp(&b.finish))
            .then(a.name.cmp(&b.name))
    });
}

/// Store a cell value on the matching raw field. Column names are compared
/// case-sensitively after surrounding-whitespace trim; unrecognized columns
/// pass through unused.
pub(crate) fn assign_field(raw: &mut RawTask, column: &str, value: String) {
    match column {
        "Task Name" => raw.name = Some(value),
        "Bucket Name" => raw.bucket = Some(value),
        "Assigned To" => raw.assigned_to = Some(value),
        "Priority" => raw.priority = Some(value),
        "Progress" => raw.progress = Some(value),
        "Late" => raw.late = Some(value),
        "Created Date" => raw.created = Some(value),
        "Start date" => raw.start = Some(value),
        "Due date" => raw.due = Some(value),
        "Completed Date" => raw.completed = Some(value),
        _ => {}
    }
}
