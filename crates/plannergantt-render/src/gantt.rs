//! Interactive HTML Gantt Chart Renderer
//!
//! Generates standalone HTML files with embedded SVG Gantt charts.
//! Features:
//! - Task bars grouped and colored by bucket
//! - Completed-task border emphasis
//! - Assignee avatar badges with initials
//! - Hover tooltips with task details
//! - "Today" marker line
//! - Responsive zoom controls

use chrono::NaiveDate;
use plannergantt_core::annotate::{ColorAssignments, PlanAnnotations, TaskAnnotations};
use plannergantt_core::{Plan, RenderError, Renderer, Task};

/// Bucket series palette, assigned in first-seen display order
pub const BUCKET_PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// HTML Gantt chart renderer configuration
#[derive(Clone, Debug)]
pub struct HtmlGanttRenderer {
    /// Width of the chart area (excluding labels) in pixels
    pub chart_width: u32,
    /// Height per task row in pixels
    pub row_height: u32,
    /// Width of the label column in pixels
    pub label_width: u32,
    /// Header height in pixels
    pub header_height: u32,
    /// Padding around the chart
    pub padding: u32,
    /// Theme (light or dark)
    pub theme: GanttTheme,
    /// Enable interactivity (tooltips, zoom controls)
    pub interactive: bool,
    /// Today marker configuration
    pub today_line: TodayLineConfig,
}

/// Configuration for the today marker line
#[derive(Clone, Debug, Default)]
pub struct TodayLineConfig {
    /// Explicit marker date; `None` means the current local date at render
    /// time
    pub date: Option<NaiveDate>,
    /// Disable the marker entirely
    pub disabled: bool,
}

impl TodayLineConfig {
    /// Pin the marker to a fixed date (useful for reproducible output)
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            disabled: false,
        }
    }

    /// Disable the marker
    pub fn disabled() -> Self {
        Self {
            date: None,
            disabled: true,
        }
    }

    fn effective_date(&self) -> Option<NaiveDate> {
        if self.disabled {
            return None;
        }
        Some(
            self.date
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
        )
    }
}

/// Color theme for the Gantt chart
#[derive(Clone, Debug)]
pub struct GanttTheme {
    pub background_color: String,
    pub grid_color: String,
    pub text_color: String,
    pub header_bg: String,
    pub today_color: String,
    pub completed_outline: String,
    pub avatar_text_color: String,
}

impl Default for GanttTheme {
    fn default() -> Self {
        Self::light()
    }
}

impl GanttTheme {
    pub fn light() -> Self {
        Self {
            background_color: "#ffffff".into(),
            grid_color: "#ecf0f1".into(),
            text_color: "#2c3e50".into(),
            header_bg: "#f8f9fa".into(),
            today_color: "#e53935".into(),
            completed_outline: "#2c3e50".into(),
            avatar_text_color: "#ffffff".into(),
        }
    }

    pub fn dark() -> Self {
        Self {
            background_color: "#1a1a2e".into(),
            grid_color: "#2d2d44".into(),
            text_color: "#eaeaea".into(),
            header_bg: "#16213e".into(),
            today_color: "#ef5350".into(),
            completed_outline: "#eaeaea".into(),
            avatar_text_color: "#1a1a2e".into(),
        }
    }
}

impl Default for HtmlGanttRenderer {
    fn default() -> Self {
        Self {
            chart_width: 900,
            row_height: 40,
            label_width: 240,
            header_height: 60,
            padding: 20,
            theme: GanttTheme::default(),
            interactive: true,
            today_line: TodayLineConfig::default(),
        }
    }
}

impl HtmlGanttRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use dark theme
    pub fn dark_theme(mut self) -> Self {
        self.theme = GanttTheme::dark();
        self
    }

    /// Configure chart width
    pub fn chart_width(mut self, width: u32) -> Self {
        self.chart_width = width;
        self
    }

    /// Configure row height
    pub fn row_height(mut self, height: u32) -> Self {
        self.row_height = height;
        self
    }

    /// Disable interactivity
    pub fn static_chart(mut self) -> Self {
        self.interactive = false;
        self
    }

    /// Configure the today marker
    pub fn with_today_line(mut self, config: TodayLineConfig) -> Self {
        self.today_line = config;
        self
    }

    /// Chart date range: task extremes with one day of padding each side
    fn visible_date_range(&self, plan: &Plan) -> (NaiveDate, NaiveDate) {
        match plan.date_range() {
            Some((start, finish)) => (
                start - chrono::Duration::days(1),
                finish + chrono::Duration::days(1),
            ),
            None => {
                let today = chrono::Local::now().date_naive();
                (today, today)
            }
        }
    }

    /// Calculate pixels per day based on date range
    fn pixels_per_day(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        let days = (end - start).num_days().max(1) as f64;
        self.chart_width as f64 / days
    }

    /// Convert a date to x position
    fn date_to_x(&self, date: NaiveDate, chart_start: NaiveDate, px_per_day: f64) -> f64 {
        let days = (date - chart_start).num_days() as f64;
        self.padding as f64 + self.label_width as f64 + (days * px_per_day)
    }

    fn total_width(&self) -> u32 {
        self.padding * 2 + self.label_width + self.chart_width
    }

    /// Document height, never below the floor the chart needs to breathe
    fn total_height(&self, task_count: usize) -> u32 {
        (self.row_height * task_count as u32 + 200).max(600)
    }

    /// Generate the complete HTML document
    fn generate_html(&self, plan: &Plan, annotations: &PlanAnnotations) -> String {
        let (chart_start, chart_end) = self.visible_date_range(plan);
        let px_per_day = self.pixels_per_day(chart_start, chart_end);

        let bucket_colors = assign_bucket_colors(plan);

        let total_width = self.total_width();
        let total_height = self.total_height(plan.tasks.len());

        let svg_content =
            self.generate_svg(plan, annotations, &bucket_colors, chart_start, chart_end, px_per_day);
        let legend = self.generate_legend(&bucket_colors);
        let css = self.generate_css();
        let js = if self.interactive {
            self.generate_js(plan, annotations)
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} - Gantt Chart</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="gantt-container">
        <div class="gantt-header">
            <h1>{title}</h1>
            <div class="gantt-controls">
                <button onclick="zoomIn()" title="Zoom In">+</button>
                <button onclick="zoomOut()" title="Zoom Out">−</button>
                <button onclick="resetZoom()" title="Reset">Reset</button>
            </div>
        </div>
        <div class="gantt-wrapper" id="gantt-wrapper">
            <svg id="gantt-svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
{svg_content}
            </svg>
        </div>
{legend}
        <div id="tooltip" class="tooltip"></div>
    </div>
    <script>
{js}
    </script>
</body>
</html>"#,
            title = html_escape(&plan.title),
            css = css,
            width = total_width,
            height = total_height,
            svg_content = svg_content,
            legend = legend,
            js = js,
        )
    }

    /// Generate the SVG content (without the outer `<svg>` tag)
    fn generate_svg(
        &self,
        plan: &Plan,
        annotations: &PlanAnnotations,
        bucket_colors: &[(String, String)],
        chart_start: NaiveDate,
        chart_end: NaiveDate,
        px_per_day: f64,
    ) -> String {
        let mut svg = String::new();

        // Background
        svg.push_str(&format!(
            r#"                <rect width="100%" height="100%" fill="{}"/>"#,
            self.theme.background_color
        ));
        svg.push('\n');

        // Grid
        svg.push_str(&self.render_grid(plan.tasks.len(), chart_start, chart_end, px_per_day));

        // Header
        svg.push_str(&self.render_header(chart_start, chart_end, px_per_day));

        // Task bars; earliest task on the top row
        for (row, task) in plan.tasks.iter().enumerate() {
            let row_annotations = annotations.tasks.get(row);
            let color = bucket_color(bucket_colors, &task.bucket);
            svg.push_str(&self.render_task_row(
                task,
                row_annotations,
                row,
                color,
                chart_start,
                px_per_day,
            ));
        }

        // Today marker on top of everything
        svg.push_str(&self.render_today_line(
            chart_start,
            chart_end,
            plan.tasks.len(),
            px_per_day,
        ));

        svg
    }

    /// Render the timeline header
    fn render_header(
        &self,
        chart_start: NaiveDate,
        chart_end: NaiveDate,
        px_per_day: f64,
    ) -> String {
        let mut svg = String::new();

        // Header background
        svg.push_str(&format!(
            r#"                <rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.padding,
            self.padding,
            self.label_width + self.chart_width,
            self.header_height,
            self.theme.header_bg
        ));
        svg.push('\n');

        // Calculate date interval
        let total_days = (chart_end - chart_start).num_days();
        let interval_days = if total_days <= 14 {
            1
        } else if total_days <= 60 {
            7
        } else if total_days <= 180 {
            14
        } else {
            30
        };

        // Date labels
        let mut current = chart_start;
        while current <= chart_end {
            let x = self.date_to_x(current, chart_start, px_per_day);

            // Tick mark
            svg.push_str(&format!(
                r#"                <line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="{color}" stroke-width="1"/>"#,
                x = x,
                y1 = self.padding + self.header_height - 10,
                y2 = self.padding + self.header_height,
                color = self.theme.text_color
            ));
            svg.push('\n');

            let label = if interval_days == 1 {
                current.format("%d").to_string()
            } else {
                current.format("%b %d").to_string()
            };

            svg.push_str(&format!(
                r#"                <text x="{x}" y="{y}" font-size="11" fill="{color}" text-anchor="middle">{label}</text>"#,
                x = x,
                y = self.padding + self.header_height - 15,
                color = self.theme.text_color,
                label = label
            ));
            svg.push('\n');

            current += chrono::Duration::days(interval_days);
        }

        // Month/year label
        let month_label = chart_start.format("%B %Y").to_string();
        svg.push_str(&format!(
            r#"                <text x="{x}" y="{y}" font-size="14" font-weight="bold" fill="{color}" text-anchor="middle">{label}</text>"#,
            x = self.padding + self.label_width + self.chart_width / 2,
            y = self.padding + 22,
            color = self.theme.text_color,
            label = month_label
        ));
        svg.push('\n');

        svg
    }

    /// Render grid lines
    fn render_grid(
        &self,
        task_count: usize,
        chart_start: NaiveDate,
        chart_end: NaiveDate,
        px_per_day: f64,
    ) -> String {
        let mut svg = String::new();
        let chart_top = self.padding + self.header_height;
        let chart_bottom = chart_top + (task_count as u32 * self.row_height);

        // Horizontal lines
        for i in 0..=task_count {
            let y = chart_top + (i as u32 * self.row_height);
            svg.push_str(&format!(
                r#"                <line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{color}" stroke-width="1"/>"#,
                x1 = self.padding,
                y = y,
                x2 = self.padding + self.label_width + self.chart_width,
                color = self.theme.grid_color
            ));
            svg.push('\n');
        }

        // Vertical lines
        let total_days = (chart_end - chart_start).num_days();
        let interval = if total_days <= 30 { 1 } else { 7 };

        let mut current = chart_start;
        while current <= chart_end {
            let x = self.date_to_x(current, chart_start, px_per_day);
            svg.push_str(&format!(
                r#"                <line x1="{x}" y1="{y1}" x2="{x}" y2="{y2}" stroke="{color}" stroke-width="1"/>"#,
                x = x,
                y1 = chart_top,
                y2 = chart_bottom,
                color = self.theme.grid_color
            ));
            svg.push('\n');
            current += chrono::Duration::days(interval);
        }

        svg
    }

    /// Render a single task row: label, bucket-colored bar, progress
    /// overlay, completed outline and avatar badges
    fn render_task_row(
        &self,
        task: &Task,
        annotations: Option<&TaskAnnotations>,
        row: usize,
        color: &str,
        chart_start: NaiveDate,
        px_per_day: f64,
    ) -> String {
        let mut svg = String::new();

        let y = self.padding + self.header_height + (row as u32 * self.row_height);
        let bar_height = (self.row_height as f64 * 0.6) as u32;
        let bar_y = y + (self.row_height - bar_height) / 2;

        // Task label; ~7px per char at 12px font
        let max_chars = (self.label_width.saturating_sub(20) / 7) as usize;
        let label = truncate(&task.name, max_chars.max(10));
        svg.push_str(&format!(
            r#"                <text x="{x}" y="{y}" font-size="12" fill="{color}">{label}</text>"#,
            x = self.padding + 8,
            y = y + self.row_height / 2 + 4,
            color = self.theme.text_color,
            label = html_escape(&label)
        ));
        svg.push('\n');

        let x_start = self.date_to_x(task.start, chart_start, px_per_day);
        let x_end = self.date_to_x(task.finish, chart_start, px_per_day);
        let bar_width = (x_end - x_start).max(4.0);

        let completed = annotations.is_some_and(|a| a.completed);
        let class = if completed {
            "task-bar completed"
        } else {
            "task-bar"
        };

        svg.push_str(&format!(
            r#"                <rect x="{x}" y="{y}" width="{w}" height="{h}" rx="3" fill="{color}" class="{class}" data-task="{id}"/>"#,
            x = x_start,
            y = bar_y,
            w = bar_width,
            h = bar_height,
            color = color,
            class = class,
            id = row
        ));
        svg.push('\n');

        // Progress overlay
        let percent = task.percent_complete();
        if percent > 0 {
            let progress_width = bar_width * (percent as f64 / 100.0);
            svg.push_str(&format!(
                r#"                <rect x="{x}" y="{y}" width="{w}" height="{h}" rx="3" fill="rgba(255,255,255,0.3)"/>"#,
                x = x_start,
                y = bar_y,
                w = progress_width,
                h = bar_height
            ));
            svg.push('\n');
        }

        // Avatar badges at the annotator's offsets
        if let Some(annotations) = annotations {
            let cy = bar_y as f64 + bar_height as f64 / 2.0;
            let radius = (bar_height as f64 / 2.0 - 2.0).max(6.0);
            for badge in &annotations.badges {
                let cx = x_start + badge.offset_days * px_per_day;
                svg.push_str(&format!(
                    r#"                <circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="{stroke}" stroke-width="1.5" class="avatar"/>"#,
                    cx = cx,
                    cy = cy,
                    r = radius,
                    fill = badge.color,
                    stroke = self.theme.background_color
                ));
                svg.push('\n');
                svg.push_str(&format!(
                    r#"                <text x="{x}" y="{y}" font-size="9" font-weight="bold" fill="{color}" text-anchor="middle" class="avatar-initials">{initials}</text>"#,
                    x = cx,
                    y = cy + 3.0,
                    color = self.theme.avatar_text_color,
                    initials = html_escape(&badge.initials)
                ));
                svg.push('\n');
            }
        }

        svg
    }

    /// Render the today marker: a vertical line with a label at the top
    fn render_today_line(
        &self,
        chart_start: NaiveDate,
        chart_end: NaiveDate,
        task_count: usize,
        px_per_day: f64,
    ) -> String {
        let Some(today) = self.today_line.effective_date() else {
            return String::new();
        };
        if today < chart_start || today > chart_end {
            return String::new();
        }

        let x = self.date_to_x(today, chart_start, px_per_day);
        let y_start = self.padding as f64;
        let y_end = self.padding as f64
            + self.header_height as f64
            + (task_count as f64 * self.row_height as f64);

        let mut svg = String::new();
        svg.push_str(&format!(
            r#"                <line class="today-line" x1="{x}" y1="{y1}" x2="{x}" y2="{y2}"/>
"#,
            x = x,
            y1 = y_start,
            y2 = y_end
        ));
        svg.push_str(&format!(
            r#"                <text class="today-label" x="{x}" y="{y}" text-anchor="start">Today</text>
"#,
            x = x + 4.0,
            y = y_start + 10.0
        ));
        svg
    }

    /// Generate the bucket legend below the chart
    fn generate_legend(&self, bucket_colors: &[(String, String)]) -> String {
        let mut legend = String::from(
            "        <div class=\"gantt-legend\">\n            <span class=\"legend-title\">Bucket</span>\n",
        );
        for (bucket, color) in bucket_colors {
            let name = if bucket.is_empty() {
                "(no bucket)"
            } else {
                bucket.as_str()
            };
            legend.push_str(&format!(
                "            <span class=\"legend-item\"><span class=\"legend-box\" style=\"background:{color}\"></span>{name}</span>\n",
                color = color,
                name = html_escape(name)
            ));
        }
        legend.push_str(
            "            <span class=\"legend-item\"><span class=\"legend-box completed-swatch\"></span>Completed</span>\n",
        );
        legend.push_str("        </div>");
        legend
    }

    /// Generate CSS styles
    fn generate_css(&self) -> String {
        format!(
            r#"        :root {{
            --bg-color: {bg};
            --text-color: {text};
            --today-color: {today};
            --completed-outline: {completed};
        }}
        * {{ margin: 0; padding: 0; box-sizing: border-box; }}
        body {{
            font-family: system-ui, -apple-system, sans-serif;
            background: var(--bg-color);
            color: var(--text-color);
            padding: 20px;
        }}
        .gantt-container {{
            max-width: 100%;
            overflow-x: auto;
        }}
        .gantt-header {{
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 16px;
        }}
        .gantt-header h1 {{
            font-size: 1.5rem;
            font-weight: 600;
        }}
        .gantt-controls button {{
            padding: 8px 16px;
            margin-left: 8px;
            border: 1px solid var(--text-color);
            background: transparent;
            color: var(--text-color);
            cursor: pointer;
            border-radius: 4px;
            font-size: 14px;
        }}
        .gantt-controls button:hover {{
            background: rgba(128,128,128,0.2);
        }}
        .gantt-wrapper {{
            overflow-x: auto;
            border: 1px solid rgba(128,128,128,0.3);
            border-radius: 8px;
        }}
        .gantt-legend {{
            display: flex;
            flex-wrap: wrap;
            gap: 24px;
            margin-top: 16px;
            font-size: 13px;
        }}
        .legend-title {{
            font-weight: 600;
        }}
        .legend-item {{
            display: flex;
            align-items: center;
            gap: 6px;
        }}
        .legend-box {{
            width: 16px;
            height: 12px;
            border-radius: 2px;
        }}
        .legend-box.completed-swatch {{
            background: transparent;
            border: 2px solid var(--completed-outline);
        }}
        .task-bar {{
            cursor: pointer;
            transition: opacity 0.2s;
        }}
        .task-bar:hover {{
            opacity: 0.8;
        }}
        .task-bar.completed {{
            stroke: var(--completed-outline);
            stroke-width: 2.5;
        }}
        .avatar, .avatar-initials {{
            pointer-events: none;
        }}
        .today-line {{
            stroke: var(--today-color);
            stroke-width: 2;
            stroke-dasharray: 4,3;
            pointer-events: none;
        }}
        .today-label {{
            font-size: 10px;
            fill: var(--today-color);
        }}
        .tooltip {{
            position: fixed;
            background: rgba(0,0,0,0.9);
            color: white;
            padding: 12px;
            border-radius: 6px;
            font-size: 13px;
            pointer-events: none;
            opacity: 0;
            transition: opacity 0.2s;
            z-index: 1000;
            max-width: 320px;
        }}
        .tooltip.visible {{
            opacity: 1;
        }}
        .tooltip .task-name {{
            font-weight: 600;
            margin-bottom: 8px;
        }}
        .tooltip .task-dates {{
            color: #aaa;
        }}
        .tooltip .task-late {{
            color: #ef5350;
        }}"#,
            bg = self.theme.background_color,
            text = self.theme.text_color,
            today = self.theme.today_color,
            completed = self.theme.completed_outline,
        )
    }

    /// Generate JavaScript for interactivity
    fn generate_js(&self, plan: &Plan, annotations: &PlanAnnotations) -> String {
        // Build task data for JS, keyed by row index
        let mut task_data = String::from("const taskData = {\n");
        for (row, task) in plan.tasks.iter().enumerate() {
            let completed = annotations
                .tasks
                .get(row)
                .is_some_and(|a| a.completed);
            task_data.push_str(&format!(
                r#"            "{row}": {{ name: "{name}", bucket: "{bucket}", assignees: "{assignees}", priority: "{priority}", progress: "{progress}", percent: {percent}, duration: "{duration} days", start: "{start}", finish: "{finish}", late: {late}, completed: {completed} }},
"#,
                row = row,
                name = html_escape(&task.name),
                bucket = html_escape(&task.bucket),
                assignees = html_escape(&task.assignees.join(", ")),
                priority = html_escape(task.priority.as_deref().unwrap_or("")),
                progress = task.progress,
                percent = task.percent_complete(),
                duration = task.duration_days,
                start = task.start,
                finish = task.finish,
                late = task.is_late,
                completed = completed,
            ));
        }
        task_data.push_str("        };\n");

        format!(
            r#"        {task_data}

        // Zoom functionality
        let currentZoom = 1;
        const svg = document.getElementById('gantt-svg');

        function zoomIn() {{
            currentZoom = Math.min(currentZoom * 1.2, 3);
            applyZoom();
        }}

        function zoomOut() {{
            currentZoom = Math.max(currentZoom / 1.2, 0.5);
            applyZoom();
        }}

        function resetZoom() {{
            currentZoom = 1;
            applyZoom();
        }}

        function applyZoom() {{
            svg.style.transform = `scale(${{currentZoom}})`;
            svg.style.transformOrigin = 'top left';
        }}

        // Tooltip functionality
        const tooltip = document.getElementById('tooltip');

        document.querySelectorAll('.task-bar').forEach(bar => {{
            bar.addEventListener('mouseenter', () => {{
                const data = taskData[bar.getAttribute('data-task')];
                if (data) {{
                    tooltip.innerHTML = `
                        <div class="task-name">${{data.name}}</div>
                        <div class="task-dates">${{data.start}} → ${{data.finish}}</div>
                        <div>Bucket: ${{data.bucket}}</div>
                        <div>Assigned To: ${{data.assignees || '—'}}</div>
                        <div>Priority: ${{data.priority || '—'}}</div>
                        <div>Progress: ${{data.progress}} (${{data.percent}}%)</div>
                        <div>Duration: ${{data.duration}}</div>
                        ${{data.late ? '<div class="task-late">Late</div>' : ''}}
                    `;
                    tooltip.classList.add('visible');
                }}
            }});

            bar.addEventListener('mousemove', (e) => {{
                tooltip.style.left = (e.clientX + 15) + 'px';
                tooltip.style.top = (e.clientY + 15) + 'px';
            }});

            bar.addEventListener('mouseleave', () => {{
                tooltip.classList.remove('visible');
            }});
        }});"#,
            task_data = task_data
        )
    }
}

impl Renderer for HtmlGanttRenderer {
    type Output = String;

    fn render(&self, plan: &Plan, annotations: &PlanAnnotations) -> Result<String, RenderError> {
        if plan.tasks.is_empty() {
            return Err(RenderError::InvalidData("No tasks to render".into()));
        }
        Ok(self.generate_html(plan, annotations))
    }
}

/// Assign bucket series colors in first-seen display order
fn assign_bucket_colors(plan: &Plan) -> Vec<(String, String)> {
    let mut assignments =
        ColorAssignments::with_palette(BUCKET_PALETTE.iter().map(|c| (*c).to_string()).collect());
    plan.buckets()
        .into_iter()
        .map(|bucket| (bucket.to_string(), assignments.color_for(bucket)))
        .collect()
}

fn bucket_color<'a>(colors: &'a [(String, String)], bucket: &str) -> &'a str {
    colors
        .iter()
        .find(|(name, _)| name == bucket)
        .map_or(BUCKET_PALETTE[0], |(_, color)| color.as_str())
}

/// HTML-escape a string
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Truncate a string with ellipsis
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        format!(
            "{}…",
            s.chars().take(max.saturating_sub(1)).collect::<String>()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plannergantt_core::annotate::Annotator;
    use plannergantt_core::{normalize, RawTask};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_test_plan() -> Plan {
        let rows = vec![
            RawTask::new()
                .name("Design Phase")
                .bucket("Engineering")
                .assigned_to("Jane Q. Public;Bob Jones")
                .progress("Complete")
                .start("01/05/2026")
                .due("01/09/2026"),
            RawTask::new()
                .name("Implementation")
                .bucket("Engineering")
                .priority("High")
                .progress("In progress")
                .start("01/12/2026")
                .due("01/23/2026"),
            RawTask::new()
                .name("Launch Comms")
                .bucket("Marketing")
                .late("true")
                .start("01/19/2026")
                .due("01/26/2026"),
        ];
        Plan::new("Test Project")
            .with_tasks(rows.iter().map(|r| normalize(r).unwrap()).collect())
    }

    fn render_default(plan: &Plan) -> String {
        let annotations = Annotator::new().annotate(plan);
        HtmlGanttRenderer::new()
            .with_today_line(TodayLineConfig::on(date(2026, 1, 15)))
            .render(plan, &annotations)
            .unwrap()
    }

    #[test]
    fn renderer_creation() {
        let renderer = HtmlGanttRenderer::new();
        assert_eq!(renderer.chart_width, 900);
        assert_eq!(renderer.row_height, 40);
        assert!(renderer.interactive);
    }

    #[test]
    fn dark_theme_switches_palette() {
        let renderer = HtmlGanttRenderer::new().dark_theme();
        assert_eq!(renderer.theme.background_color, "#1a1a2e");
    }

    #[test]
    fn produces_valid_html() {
        let plan = create_test_plan();
        let html = render_default(&plan);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Test Project"));
        assert!(html.contains("Design Phase"));
        assert!(html.contains("<svg"));
    }

    #[test]
    fn bars_are_colored_by_bucket() {
        let plan = create_test_plan();
        let html = render_default(&plan);

        // Engineering seen first, Marketing second
        assert!(html.contains(BUCKET_PALETTE[0]));
        assert!(html.contains(BUCKET_PALETTE[1]));
        assert!(html.contains("Engineering"));
        assert!(html.contains("Marketing"));
    }

    #[test]
    fn completed_task_gets_emphasis_class() {
        let plan = create_test_plan();
        let html = render_default(&plan);
        assert!(html.contains(r#"class="task-bar completed" data-task="0""#));
        assert!(html.contains(r#"class="task-bar" data-task="1""#));
    }

    #[test]
    fn avatars_carry_initials() {
        let plan = create_test_plan();
        let html = render_default(&plan);
        assert!(html.contains(">JP</text>"));
        assert!(html.contains(">BJ</text>"));
    }

    #[test]
    fn today_marker_inside_range_is_drawn() {
        let plan = create_test_plan();
        let html = render_default(&plan);
        assert!(html.contains(r#"<line class="today-line""#));
        assert!(html.contains(">Today</text>"));
    }

    #[test]
    fn today_marker_outside_range_is_omitted() {
        let plan = create_test_plan();
        let annotations = Annotator::new().annotate(&plan);
        let html = HtmlGanttRenderer::new()
            .with_today_line(TodayLineConfig::on(date(2027, 6, 1)))
            .render(&plan, &annotations)
            .unwrap();
        assert!(!html.contains(r#"<line class="today-line""#));
    }

    #[test]
    fn disabled_today_marker_is_omitted() {
        let plan = create_test_plan();
        let annotations = Annotator::new().annotate(&plan);
        let html = HtmlGanttRenderer::new()
            .with_today_line(TodayLineConfig::disabled())
            .render(&plan, &annotations)
            .unwrap();
        assert!(!html.contains(r#"<line class="today-line""#));
    }

    #[test]
    fn tooltip_data_includes_export_fields() {
        let plan = create_test_plan();
        let html = render_default(&plan);
        assert!(html.contains(r#"bucket: "Engineering""#));
        assert!(html.contains(r#"priority: "High""#));
        assert!(html.contains(r#"progress: "In Progress""#));
        assert!(html.contains("late: true"));
    }

    #[test]
    fn static_chart_has_no_script_body() {
        let plan = create_test_plan();
        let annotations = Annotator::new().annotate(&plan);
        let html = HtmlGanttRenderer::new()
            .static_chart()
            .render(&plan, &annotations)
            .unwrap();
        assert!(!html.contains("const taskData"));
        assert!(!html.contains("function zoomIn"));
    }

    #[test]
    fn empty_plan_fails() {
        let plan = Plan::new("Empty");
        let annotations = Annotator::new().annotate(&plan);
        let result = HtmlGanttRenderer::new().render(&plan, &annotations);
        assert!(result.is_err());
    }

    #[test]
    fn height_has_a_floor_and_scales_with_rows() {
        let renderer = HtmlGanttRenderer::new();
        assert_eq!(renderer.total_height(3), 600);
        assert_eq!(renderer.total_height(20), 20 * 40 + 200);
    }

    #[test]
    fn titles_are_escaped() {
        let mut plan = create_test_plan();
        plan.title = "R&D <Q1>".to_string();
        let html = render_default(&plan);
        assert!(html.contains("R&amp;D &lt;Q1&gt;"));
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate("Short", 20), "Short");
        assert_eq!(truncate("This is a very long task name", 15), "This is a very…");
    }
}
