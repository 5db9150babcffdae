//! Expandable profile blocks.

use folio_core::CellMetrics;

pub const COLLAPSED_ICON: &str = "+";
pub const EXPANDED_ICON: &str = "−";

/// A titled block whose body is hidden until toggled open.
#[derive(Debug, Clone, PartialEq)]
pub struct Collapsible {
    title: String,
    lines: Vec<String>,
    /// Height limit of the body in pixels; `None` keeps it collapsed.
    max_height: Option<u32>,
    /// Styling flag on the trigger while expanded.
    active: bool,
}

impl Collapsible {
    pub fn new(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            title: title.into(),
            lines,
            max_height: None,
            active: false,
        }
    }

    /// Natural height of the body.
    pub fn scroll_height(&self, cells: &CellMetrics) -> u32 {
        cells.rows_to_px(self.lines.len() as u32)
    }

    /// Expand to the full body height, or collapse if already expanded.
    pub fn toggle(&mut self, cells: &CellMetrics) {
        if self.max_height.is_some() {
            self.max_height = None;
            self.active = false;
        } else {
            self.max_height = Some(self.scroll_height(cells));
            self.active = true;
        }
    }

    /// Body lines that fit under the current height limit.
    pub fn visible_lines(&self, cells: &CellMetrics) -> &[String] {
        let rows = self
            .max_height
            .map(|h| cells.px_to_rows(h) as usize)
            .unwrap_or(0);
        &self.lines[..rows.min(self.lines.len())]
    }

    pub fn icon(&self) -> &'static str {
        if self.max_height.is_some() {
            EXPANDED_ICON
        } else {
            COLLAPSED_ICON
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn max_height(&self) -> Option<u32> {
        self.max_height
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
