//! # plannergantt-render
//!
//! Rendering backend for plannergantt task tables.
//!
//! This crate provides the interactive HTML Gantt renderer: a single
//! self-contained document with embedded SVG task bars grouped and colored
//! by bucket, assignee avatars, a today marker, hover tooltips and zoom
//! controls.
//!
//! ## Example
//!
//! ```rust,ignore
//! use plannergantt_core::{annotate::Annotator, Plan, Renderer};
//! use plannergantt_render::HtmlGanttRenderer;
//!
//! let annotations = Annotator::new().annotate(&plan);
//! let html = HtmlGanttRenderer::new().render(&plan, &annotations)?;
//! std::fs::write("gantt.html", html)?;
//! ```

pub mod gantt;

pub use gantt::{GanttTheme, HtmlGanttRenderer, TodayLineConfig};
