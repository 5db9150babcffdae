//! Transient notifications.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// How long a toast stays visible.
pub const TOAST_DURATION_MS: u64 = 3000;

/// A short message shown for [`TOAST_DURATION_MS`] and then hidden.
#[derive(Debug, Default)]
pub struct Toast {
    message: Option<String>,
    shown_at_ms: u64,
}

impl Toast {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `message`, replacing any toast on screen and restarting the timer.
    pub fn show(&mut self, message: impl Into<String>, now_ms: u64) {
        self.message = Some(message.into());
        self.shown_at_ms = now_ms;
    }

    /// Hide the toast once its time is up.
    pub fn update(&mut self, now_ms: u64) {
        if self.message.is_some() && now_ms.saturating_sub(self.shown_at_ms) >= TOAST_DURATION_MS {
            self.message = None;
        }
    }

    /// The message currently on screen.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn is_visible(&self) -> bool {
        self.message.is_some()
    }

    /// Draw the toast centred near the bottom of `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let Some(message) = self.message() else {
            return;
        };
        let width = (message.chars().count() as u16 + 4).min(area.width);
        let [row] = Layout::vertical([Constraint::Length(3)])
            .flex(Flex::End)
            .areas(area.inner(Margin::new(0, 1)));
        let [popup] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(message)
                .centered()
                .style(Style::new().fg(Color::White).bg(Color::Black))
                .block(
                    Block::new()
                        .borders(Borders::ALL)
                        .border_style(Style::new().fg(accent)),
                ),
            popup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_hides_after_duration() {
        let mut toast = Toast::new();
        assert!(!toast.is_visible());

        toast.show("hello", 1_000);
        toast.update(3_999);
        assert_eq!(toast.message(), Some("hello"));

        toast.update(4_000);
        assert!(!toast.is_visible());
    }

    #[test]
    fn test_show_restarts_timer() {
        let mut toast = Toast::new();
        toast.show("first", 0);
        toast.show("second", 2_000);
        toast.update(3_000);
        assert_eq!(toast.message(), Some("second"));
        toast.update(5_000);
        assert_eq!(toast.message(), None);
    }
}
