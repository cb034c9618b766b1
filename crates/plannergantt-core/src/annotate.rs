//! Per-row presentation metadata.
//!
//! The annotator derives everything a renderer needs beyond the schedule
//! itself: initials and a stable color per assignee, avatar marker offsets,
//! and completed-task flags. Nothing here alters schedule fields.
//!
//! Color state is scoped to one [`Annotator`] instance; build one per render
//! pass and let it drop afterwards, so the same person gets the same color
//! everywhere in a single chart without any process-global state.
//!
//! # Example
//!
//! ```rust
//! use plannergantt_core::annotate::Annotator;
//! use plannergantt_core::{normalize, Plan, RawTask};
//!
//! let task = normalize(&RawTask::new().name("Ship").assigned_to("Jane Q. Public").start("01/05/2026")).unwrap();
//! let plan = Plan::new("Q1").with_tasks(vec![task]);
//!
//! let annotations = Annotator::new().annotate(&plan);
//! assert_eq!(annotations.tasks[0].badges[0].initials, "JP");
//! ```

use std::collections::HashMap;

use crate::Plan;

/// Fixed avatar color palette, cycled in first-seen order
pub const AVATAR_PALETTE: [&str; 15] = [
    "#3498db", "#e74c3c", "#2ecc71", "#9b59b6", "#f39c12", "#1abc9c", "#e67e22", "#34495e",
    "#d35400", "#16a085", "#8e44ad", "#2980b9", "#c0392b", "#27ae60", "#7f8c8d",
];

/// Trailing name tokens dropped before deriving initials, compared
/// case-insensitively after removing non-alphabetic characters
const NAME_SUFFIXES: [&str; 10] = [
    "jr", "sr", "ii", "iii", "iv", "phd", "md", "esq", "dds", "dvm",
];

/// Avatar spacing as a fraction of the mean task duration
const AVATAR_SPACING_FACTOR: f64 = 0.08;

// ============================================================================
// Color Assignment
// ============================================================================

/// First-seen color assignment over a fixed palette.
///
/// The n-th distinct name receives `palette[n % palette_len]`; repeat
/// encounters reuse the stored color. Deterministic for a fixed encounter
/// order, and colors repeat once the palette is exhausted.
#[derive(Clone, Debug)]
pub struct ColorAssignments {
    palette: Vec<String>,
    assigned: HashMap<String, String>,
}

impl ColorAssignments {
    /// Create an assignment context over the default avatar palette
    pub fn new() -> Self {
        Self::with_palette(AVATAR_PALETTE.iter().map(|c| (*c).to_string()).collect())
    }

    /// Create an assignment context over a custom palette (must be non-empty)
    pub fn with_palette(palette: Vec<String>) -> Self {
        debug_assert!(!palette.is_empty());
        Self {
            palette,
            assigned: HashMap::new(),
        }
    }

    /// Color for a name, assigning the next palette entry on first encounter
    pub fn color_for(&mut self, name: &str) -> String {
        if let Some(color) = self.assigned.get(name) {
            return color.clone();
        }
        let color = self.palette[self.assigned.len() % self.palette.len()].clone();
        self.assigned.insert(name.to_string(), color.clone());
        color
    }

    /// Number of distinct names assigned so far
    pub fn len(&self) -> usize {
        self.assigned.len()
    }

    /// True when no name has been assigned yet
    pub fn is_empty(&self) -> bool {
        self.assigned.is_empty()
    }
}

impl Default for ColorAssignments {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Initials
// ============================================================================

/// Derive two-character avatar initials from an assignee name.
///
/// Trailing suffix tokens (Jr, Sr, II, PhD, ...) are stripped repeatedly
/// from the end. An empty result yields `"??"`; a single remaining token
/// yields its first two characters; otherwise the first characters of the
/// first and last remaining tokens are used. Middle tokens are ignored.
pub fn initials(name: &str) -> String {
    let mut tokens: Vec<&str> = name.split_whitespace().collect();
    while tokens.last().is_some_and(|last| is_name_suffix(last)) {
        tokens.pop();
    }

    match tokens.as_slice() {
        [] => "??".to_string(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, .., last] => {
            let mut pair = String::new();
            pair.extend(first.chars().next());
            pair.extend(last.chars().next());
            pair.to_uppercase()
        }
    }
}

fn is_name_suffix(token: &str) -> bool {
    let alpha: String = token
        .chars()
        .filter(|c| c.is_alphabetic())
        .collect::<String>()
        .to_lowercase();
    NAME_SUFFIXES.contains(&alpha.as_str())
}

// ============================================================================
// Annotations
// ============================================================================

/// One assignee's avatar marker on a task bar
#[derive(Clone, Debug, PartialEq)]
pub struct AssigneeBadge {
    /// Trimmed assignee name as it appeared in the export
    pub name: String,
    /// Avatar initials
    pub initials: String,
    /// Stable color for this assignee within the render pass
    pub color: String,
    /// Horizontal marker offset from the task start, in days
    pub offset_days: f64,
}

/// Presentation metadata for one task row
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskAnnotations {
    /// Avatar badges in export order
    pub badges: Vec<AssigneeBadge>,
    /// Whether the row gets completed-task visual emphasis
    pub completed: bool,
}

/// Presentation metadata for a whole plan, parallel to `Plan::tasks` by index
#[derive(Clone, Debug, Default)]
pub struct PlanAnnotations {
    pub tasks: Vec<TaskAnnotations>,
    /// Mean `duration_days` across all tasks, 0.0 for an empty plan
    pub mean_duration_days: f64,
}

/// Annotation context for a single render pass.
///
/// Holds the color assignment state; `annotate` consumes the annotator so
/// the state cannot outlive the pass.
#[derive(Debug, Default)]
pub struct Annotator {
    colors: ColorAssignments,
}

impl Annotator {
    /// Create an annotator with the default palette
    pub fn new() -> Self {
        Self {
            colors: ColorAssignments::new(),
        }
    }

    /// Create an annotator over pre-seeded or custom color assignments
    pub fn with_colors(colors: ColorAssignments) -> Self {
        Self { colors }
    }

    /// Compute presentation metadata for every task in the plan.
    ///
    /// Completed flags are keyed by row index, so tasks sharing a name are
    /// styled independently.
    pub fn annotate(mut self, plan: &Plan) -> PlanAnnotations {
        let mean_duration_days = mean_duration(plan);
        let spacing = mean_duration_days * AVATAR_SPACING_FACTOR;

        let tasks = plan
            .tasks
            .iter()
            .map(|task| TaskAnnotations {
                badges: task
                    .assignees
                    .iter()
                    .enumerate()
                    .map(|(i, name)| AssigneeBadge {
                        name: name.clone(),
                        initials: initials(name),
                        color: self.colors.color_for(name),
                        offset_days: spacing * (1.0 + 2.0 * i as f64),
                    })
                    .collect(),
                completed: task.is_complete(),
            })
            .collect();

        PlanAnnotations {
            tasks,
            mean_duration_days,
        }
    }
}

fn mean_duration(plan: &Plan) -> f64 {
    if plan.tasks.is_empty() {
        return 0.0;
    }
    let total: i64 = plan.tasks.iter().map(|t| t.duration_days).sum();
    total as f64 / plan.tasks.len() as f64
}

// ============================================================================
// Tests
// ============================================================================
