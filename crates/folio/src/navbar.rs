//! Navbar drop shadow driven by the scroll position.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Scroll offsets strictly above this raise the navbar.
pub const SHADOW_THRESHOLD_PX: u32 = 50;

/// CSS value of the raised shadow.
const RAISED_SHADOW: &str = "0 4px 15px rgba(0,0,0,0.05)";

/// Whether the navbar casts a shadow over the page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavbarShadow {
    #[default]
    Flat,
    Raised,
}

impl NavbarShadow {
    /// Shadow state for a vertical scroll offset in pixels.
    pub fn for_scroll(scroll_y: u32) -> Self {
        if scroll_y > SHADOW_THRESHOLD_PX {
            NavbarShadow::Raised
        } else {
            NavbarShadow::Flat
        }
    }

    /// The equivalent CSS `box-shadow` value.
    pub fn css(self) -> &'static str {
        match self {
            NavbarShadow::Flat => "none",
            NavbarShadow::Raised => RAISED_SHADOW,
        }
    }
}

/// The shaded rule drawn under the navbar when it is raised.
#[derive(Debug, Clone, Copy)]
pub struct ShadowRule {
    pub shadow: NavbarShadow,
    pub background: (u8, u8, u8),
}

impl Widget for ShadowRule {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.shadow == NavbarShadow::Flat {
            return;
        }
        let (r, g, b) = self.background;
        let shade = Color::Rgb(r / 2, g / 2, b / 2);
        for x in area.left()..area.right() {
            buf[(x, area.top())]
                .set_symbol("▀")
                .set_style(Style::new().fg(shade));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_threshold() {
        assert_eq!(NavbarShadow::for_scroll(0), NavbarShadow::Flat);
        assert_eq!(NavbarShadow::for_scroll(50), NavbarShadow::Flat);
        assert_eq!(NavbarShadow::for_scroll(51), NavbarShadow::Raised);
    }

    #[test]
    fn test_scroll_0_to_51_transition() {
        let states: Vec<&str> = (0..=51).map(|y| NavbarShadow::for_scroll(y).css()).collect();
        assert!(states[..51].iter().all(|s| *s == "none"));
        assert_eq!(states[51], "0 4px 15px rgba(0,0,0,0.05)");
    }

    #[test]
    fn test_shadow_rule_rendering() {
        let area = Rect::new(0, 0, 3, 1);
        let mut buf = Buffer::empty(area);
        ShadowRule {
            shadow: NavbarShadow::Flat,
            background: (20, 40, 60),
        }
        .render(area, &mut buf);
        assert_eq!(buf, Buffer::empty(area));

        ShadowRule {
            shadow: NavbarShadow::Raised,
            background: (20, 40, 60),
        }
        .render(area, &mut buf);
        assert_eq!(buf[(1, 0)].symbol(), "▀");
        assert_eq!(buf[(1, 0)].fg, Color::Rgb(10, 20, 30));
    }
}
