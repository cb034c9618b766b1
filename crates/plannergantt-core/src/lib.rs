//! # plannergantt-core
//!
//! Core domain model and normalization logic for the plannergantt timeline
//! renderer.
//!
//! This crate provides:
//! - Domain types: `RawTask`, `Task`, `Plan`, `Progress`
//! - Schedule derivation: turning sparse export date fields into a definite
//!   `start`/`finish` pair per row
//! - Presentation metadata (initials, colors, avatar offsets) in [`annotate`]
//! - The `Renderer` trait and error types
//!
//! ## Example
//!
//! ```rust
//! use plannergantt_core::{normalize, RawTask};
//!
//! let raw = RawTask::new()
//!     .name("Ship v2")
//!     .bucket("Engineering")
//!     .due("03/14/2026");
//!
//! let task = normalize(&raw).unwrap();
//! assert_eq!(task.duration_days, 8); // due - 7 days .. due, inclusive
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod annotate;

// ============================================================================
// Constants
// ============================================================================

/// Days assumed for a task when only one of start/finish can be resolved
pub const DEFAULT_DURATION_DAYS: i64 = 7;

/// The single date pattern accepted in export cells (month/day/year)
pub const EXPORT_DATE_FORMAT: &str = "%m/%d/%Y";

// ============================================================================
// Raw Row
// ============================================================================

/// One row of a Planner export before normalization.
///
/// Every field is optional: export columns may be absent entirely, and
/// present cells may be blank or malformed. Field values are kept verbatim;
/// all interpretation happens in [`normalize`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawTask {
    pub name: Option<String>,
    pub bucket: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<String>,
    pub progress: Option<String>,
    pub late: Option<String>,
    pub created: Option<String>,
    pub start: Option<String>,
    pub due: Option<String>,
    pub completed: Option<String>,
}

impl RawTask {
    /// Create an empty row
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the task name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the bucket name
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Set the raw assignee list (`;`-delimited)
    pub fn assigned_to(mut self, assigned: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned.into());
        self
    }

    /// Set the priority text
    pub fn priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = Some(priority.into());
        self
    }

    /// Set the progress status text
    pub fn progress(mut self, progress: impl Into<String>) -> Self {
        self.progress = Some(progress.into());
        self
    }

    /// Set the lateness flag text
    pub fn late(mut self, late: impl Into<String>) -> Self {
        self.late = Some(late.into());
        self
    }

    /// Set the created-date cell
    pub fn created(mut self, created: impl Into<String>) -> Self {
        self.created = Some(created.into());
        self
    }

    /// Set the start-date cell
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Set the due-date cell
    pub fn due(mut self, due: impl Into<String>) -> Self {
        self.due = Some(due.into());
        self
    }

    /// Set the completed-date cell
    pub fn completed(mut self, completed: impl Into<String>) -> Self {
        self.completed = Some(completed.into());
        self
    }
}

// ============================================================================
// Progress
// ============================================================================

/// Textual task state mapped to a display percentage
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Progress {
    #[default]
    NotStarted,
    InProgress,
    Complete,
}

impl Progress {
    /// Parse a status cell. Comparison is case-insensitive after trimming.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "not started" => Some(Progress::NotStarted),
            "in progress" => Some(Progress::InProgress),
            "complete" | "completed" => Some(Progress::Complete),
            _ => None,
        }
    }

    /// Interpret an optional status cell; unknown or missing text maps to
    /// `NotStarted` rather than failing.
    pub fn from_export(text: Option<&str>) -> Self {
        text.and_then(Self::parse).unwrap_or_default()
    }

    /// Display percentage for this state
    pub const fn percent(self) -> u8 {
        match self {
            Progress::NotStarted => 0,
            Progress::InProgress => 50,
            Progress::Complete => 100,
        }
    }
}

impl std::fmt::Display for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Progress::NotStarted => write!(f, "Not Started"),
            Progress::InProgress => write!(f, "In Progress"),
            Progress::Complete => write!(f, "Complete"),
        }
    }
}

// ============================================================================
// Task
// ============================================================================

/// A normalized, display-ready task row.
///
/// Invariants: `finish >= start` and `duration_days >= 1` always hold; rows
/// that cannot yield both dates never become a `Task`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Task name (not required to be unique)
    pub name: String,
    /// Grouping key; empty when the export had no bucket
    pub bucket: String,
    /// Trimmed, non-empty assignee names in export order
    pub assignees: Vec<String>,
    /// Priority text, passed through verbatim
    pub priority: Option<String>,
    /// Mapped progress state
    pub progress: Progress,
    /// Lateness flag from the export, independent of computed dates
    pub is_late: bool,
    /// Derived start date
    pub start: NaiveDate,
    /// Derived finish date
    pub finish: NaiveDate,
    /// Inclusive span in days: `(finish - start) + 1`
    pub duration_days: i64,
}

impl Task {
    /// Display percentage for this task's progress state
    pub fn percent_complete(&self) -> u8 {
        self.progress.percent()
    }

    /// True when the task is fully complete
    pub fn is_complete(&self) -> bool {
        self.progress == Progress::Complete
    }
}

// ============================================================================
// Plan
// ============================================================================

/// A titled, ordered table of normalized tasks, as handed to renderers
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Chart title
    pub title: String,
    /// Tasks in display order (ascending by start, finish, name)
    pub tasks: Vec<Task>,
}

impl Plan {
    /// Create an empty plan with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tasks: Vec::new(),
        }
    }

    /// Attach the task table
    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    /// Earliest start and latest finish over all tasks
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.tasks.iter().map(|t| t.start).min()?;
        let finish = self.tasks.iter().map(|t| t.finish).max()?;
        Some((start, finish))
    }

    /// Bucket names in first-seen order, deduplicated
    pub fn buckets(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.bucket.as_str()) {
                seen.push(task.bucket.as_str());
            }
        }
        seen
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Why a row was dropped during normalization
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum DropReason {
    #[error("no resolvable start or finish date")]
    Unschedulable,
}

/// Parse an export date cell under the fixed `%m/%d/%Y` pattern.
///
/// Anything that fails the pattern is treated as absent, not as an error.
pub fn parse_export_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), EXPORT_DATE_FORMAT).ok()
}

/// Split a raw assignee cell on `;`, trimming and dropping empty pieces
pub fn split_assignees(field: &str) -> Vec<String> {
    field
        .split(';')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}

/// Resolve a definite `(start, finish)` pair from the row's four date cells.
///
/// `start` prefers the start cell over the created cell; `finish` prefers due
/// over completed. A lone date implies the other at `DEFAULT_DURATION_DAYS`
/// distance, and an inverted pair clamps `finish` up to `start`.
fn derive_schedule(raw: &RawTask) -> Result<(NaiveDate, NaiveDate), DropReason> {
    let start = raw
        .start
        .as_deref()
        .and_then(parse_export_date)
        .or_else(|| raw.created.as_deref().and_then(parse_export_date));
    let finish = raw
        .due
        .as_deref()
        .and_then(parse_export_date)
        .or_else(|| raw.completed.as_deref().and_then(parse_export_date));

    match (start, finish) {
        (None, None) => Err(DropReason::Unschedulable),
        (Some(s), None) => Ok((s, s + chrono::Duration::days(DEFAULT_DURATION_DAYS))),
        (None, Some(f)) => Ok((f - chrono::Duration::days(DEFAULT_DURATION_DAYS), f)),
        (Some(s), Some(f)) if f < s => Ok((s, s)),
        (Some(s), Some(f)) => Ok((s, f)),
    }
}

/// Normalize one export row into a display-ready [`Task`].
///
/// Pure and independent per row; the only failure is a row with no
/// resolvable schedule.
pub fn normalize(raw: &RawTask) -> Result<Task, DropReason> {
    let (start, finish) = derive_schedule(raw)?;

    Ok(Task {
        name: raw.name.clone().unwrap_or_default(),
        bucket: raw.bucket.clone().unwrap_or_default(),
        assignees: raw
            .assigned_to
            .as_deref()
            .map(split_assignees)
            .unwrap_or_default(),
        priority: raw.priority.clone(),
        progress: Progress::from_export(raw.progress.as_deref()),
        is_late: raw
            .late
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("true")),
        duration_days: (finish - start).num_days() + 1,
        start,
        finish,
    })
}

// ============================================================================
// Traits
// ============================================================================

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render a plan and its presentation metadata to the output format
    fn render(
        &self,
        plan: &Plan,
        annotations: &annotate::PlanAnnotations,
    ) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
