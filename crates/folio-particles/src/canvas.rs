//! Painting a recorded frame onto a ratatui buffer.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Circle, Line},
    },
};

use crate::surface::{DisplayList, DrawCommand};

/// Widget that renders a [`DisplayList`] on a braille canvas.
///
/// Surface coordinates grow downwards while canvas coordinates grow upwards,
/// so the y axis is flipped. Translucent colours are blended over the
/// background colour because terminal cells cannot hold alpha.
#[derive(Debug, Clone, Copy)]
pub struct ParticleCanvas<'a> {
    frame: &'a DisplayList,
    background: (u8, u8, u8),
}

impl<'a> ParticleCanvas<'a> {
    pub fn new(frame: &'a DisplayList, background: (u8, u8, u8)) -> Self {
        Self { frame, background }
    }
}

impl Widget for ParticleCanvas<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let size = self.frame.size();
        if size.is_empty() || area.is_empty() {
            return;
        }
        let width = f64::from(size.width);
        let height = f64::from(size.height);
        let bg = self.background;
        let commands = self.frame.commands();

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(Color::Rgb(bg.0, bg.1, bg.2))
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                // Lines first so particles stay on top of them.
                for command in commands {
                    if let DrawCommand::Line {
                        x1,
                        y1,
                        x2,
                        y2,
                        color,
                        ..
                    } = *command
                    {
                        ctx.draw(&Line::new(x1, height - y1, x2, height - y2, color.over(bg)));
                    }
                }
                ctx.layer();
                for command in commands {
                    if let DrawCommand::Circle {
                        x,
                        y,
                        radius,
                        color,
                    } = *command
                    {
                        ctx.draw(&Circle {
                            x,
                            y: height - y,
                            radius,
                            color: color.over(bg),
                        });
                    }
                }
            })
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::PARTICLE_COLOR;
    use crate::surface::Surface;
    use folio_core::SurfaceSize;

    #[test]
    fn test_empty_frame_leaves_buffer_untouched() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        ParticleCanvas::new(&DisplayList::new(), (0, 0, 0)).render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_particle_is_painted() {
        let area = Rect::new(0, 0, 4, 2);
        let mut frame = DisplayList::new();
        frame.clear(SurfaceSize::new(32, 32));
        frame.fill_circle(4.0, 4.0, 2.0, PARTICLE_COLOR);

        let mut buf = Buffer::empty(area);
        ParticleCanvas::new(&frame, (10, 20, 40)).render(area, &mut buf);

        let painted = buf
            .content()
            .iter()
            .filter(|cell| cell.symbol() != " " && cell.symbol() != "\u{2800}")
            .count();
        assert!(painted > 0);
    }
}
