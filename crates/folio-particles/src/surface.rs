//! Drawing surface abstraction and a recording implementation.

use folio_core::{Rgba, SurfaceSize};

/// Something the particle field can draw onto.
pub trait Surface {
    /// Erase everything on a surface of the given size.
    fn clear(&mut self, size: SurfaceSize);

    /// Draw a filled circle.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba);

    /// Draw a straight line segment.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear {
        size: SurfaceSize,
    },
    Circle {
        x: f64,
        y: f64,
        radius: f64,
        color: Rgba,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        width: f64,
        color: Rgba,
    },
}

/// Records the drawing operations of one frame.
///
/// Clearing drops everything recorded so far, so after a frame the list
/// holds exactly that frame's commands.
#[derive(Debug, Clone, Default)]
pub struct DisplayList {
    size: SurfaceSize,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size given to the last `clear`.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of circles drawn since the last clear.
    pub fn circle_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    /// Number of line segments drawn since the last clear.
    pub fn line_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
            .count()
    }
}

impl Surface for DisplayList {
    fn clear(&mut self, size: SurfaceSize) {
        self.size = size;
        self.commands.clear();
        self.commands.push(DrawCommand::Clear { size });
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            x,
            y,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Rgba) {
        self.commands.push(DrawCommand::Line {
            x1: from.0,
            y1: from.1,
            x2: to.0,
            y2: to.1,
            width,
            color,
        });
    }
}
