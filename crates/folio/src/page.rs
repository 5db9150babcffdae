//! The page document: sections, scrolling, focus and reveal state.

use folio_config::PageConfig;
use folio_core::CellMetrics;
use ratatui::{
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
};

use crate::collapsible::Collapsible;
use crate::news::{NewsEntry, NewsList};
use crate::reveal::{RevealMarker, RevealObserver, TargetId, VSpan};

/// Sections of the page, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Intro,
    Profile,
    Account,
    News,
    Footer,
}

#[derive(Debug, Clone)]
struct Section {
    kind: SectionKind,
    /// Reveal target; sections without one are always shown.
    target: Option<TargetId>,
}

/// A control that can hold keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Trigger of the profile block at this index.
    Toggle(usize),
    CopyButton,
    /// News link at this index of [`NewsList::anchors`].
    NewsLink(usize),
}

/// What activating the focused control asks the app to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
    Toggled(usize),
    CopyAccount,
    /// Copy this link target.
    CopyLink(String),
}

/// The scrollable page.
#[derive(Debug)]
pub struct Page {
    content: PageConfig,
    profile: Vec<Collapsible>,
    sections: Vec<Section>,
    reveal: RevealObserver,
    /// Vertical scroll offset in pixels.
    scroll_px: u32,
    /// Index into [`Page::focusables`].
    focus: usize,
}

impl Page {
    pub fn new(content: PageConfig) -> Self {
        let profile = content
            .profile
            .iter()
            .map(|entry| Collapsible::new(entry.title.clone(), entry.lines.clone()))
            .collect();

        let mut reveal = RevealObserver::new();
        let sections = [
            (SectionKind::Hero, Some(RevealMarker::FadeInUp)),
            (SectionKind::Intro, Some(RevealMarker::ScrollReveal)),
            (SectionKind::Profile, Some(RevealMarker::ScrollReveal)),
            (SectionKind::Account, Some(RevealMarker::ScrollReveal)),
            (SectionKind::News, Some(RevealMarker::ScrollReveal)),
            (SectionKind::Footer, None),
        ]
        .into_iter()
        .map(|(kind, marker)| Section {
            kind,
            target: marker.map(|m| reveal.observe(m)),
        })
        .collect();

        Self {
            content,
            profile,
            sections,
            reveal,
            scroll_px: 0,
            focus: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.content.title
    }

    pub fn account_number(&self) -> &str {
        &self.content.account_number
    }

    pub fn profile(&self) -> &[Collapsible] {
        &self.profile
    }

    pub fn scroll_px(&self) -> u32 {
        self.scroll_px
    }

    /// Pixel extent of every section, in page order.
    pub fn layout(&self, news: &NewsList, cells: &CellMetrics) -> Vec<(SectionKind, VSpan)> {
        let mut top = 0;
        self.sections
            .iter()
            .map(|section| {
                let rows = self.section_lines(section.kind, news, cells, Color::Reset).len() as u32;
                let span = VSpan::new(top, cells.rows_to_px(rows));
                top = span.bottom();
                (section.kind, span)
            })
            .collect()
    }

    /// Total document height in rows.
    pub fn content_rows(&self, news: &NewsList, cells: &CellMetrics) -> u32 {
        self.layout(news, cells)
            .last()
            .map(|(_, span)| cells.px_to_rows(span.bottom()))
            .unwrap_or(0)
    }

    /// Reveal sections visible in a viewport of `viewport_rows` rows.
    pub fn update_reveal(
        &mut self,
        news: &NewsList,
        cells: &CellMetrics,
        viewport_rows: u16,
        now_ms: u64,
    ) {
        let viewport_px = cells.rows_to_px(u32::from(viewport_rows));
        let layout = self.layout(news, cells);
        for (section, (_, span)) in self.sections.iter().zip(layout) {
            if let Some(target) = section.target {
                self.reveal
                    .check(target, span, self.scroll_px, viewport_px, now_ms);
            }
        }
    }

    pub fn is_revealed(&self, kind: SectionKind) -> bool {
        self.sections
            .iter()
            .find(|s| s.kind == kind)
            .is_some_and(|s| s.target.is_none_or(|t| self.reveal.is_revealed(t)))
    }

    /// Scroll by whole rows, keeping the last row of the document reachable.
    pub fn scroll_by(
        &mut self,
        rows: i32,
        cells: &CellMetrics,
        content_rows: u32,
        viewport_rows: u16,
    ) {
        let max_rows = content_rows.saturating_sub(u32::from(viewport_rows));
        let current = cells.px_to_rows(self.scroll_px) as i64;
        let target = (current + i64::from(rows)).clamp(0, i64::from(max_rows));
        self.scroll_px = cells.rows_to_px(target as u32);
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_px = 0;
    }

    pub fn scroll_to_bottom(&mut self, cells: &CellMetrics, content_rows: u32, viewport_rows: u16) {
        self.scroll_px = cells.rows_to_px(content_rows.saturating_sub(u32::from(viewport_rows)));
    }

    /// Focusable controls in tab order.
    pub fn focusables(&self, news: &NewsList) -> Vec<Focus> {
        (0..self.profile.len())
            .map(Focus::Toggle)
            .chain(std::iter::once(Focus::CopyButton))
            .chain((0..news.anchors().count()).map(Focus::NewsLink))
            .collect()
    }

    /// The focused control. The news list may shrink between refreshes, so
    /// the stored index wraps.
    pub fn focused(&self, news: &NewsList) -> Focus {
        let focusables = self.focusables(news);
        focusables[self.focus % focusables.len()]
    }

    pub fn focus_next(&mut self, news: &NewsList) {
        let count = self.focusables(news).len();
        self.focus = (self.focus % count + 1) % count;
    }

    pub fn focus_prev(&mut self, news: &NewsList) {
        let count = self.focusables(news).len();
        self.focus = (self.focus % count + count - 1) % count;
    }

    /// Activate the focused control.
    pub fn activate(&mut self, news: &NewsList, cells: &CellMetrics) -> PageAction {
        match self.focused(news) {
            Focus::Toggle(index) => {
                self.toggle_profile(index, cells);
                PageAction::Toggled(index)
            }
            Focus::CopyButton => PageAction::CopyAccount,
            Focus::NewsLink(index) => match news.anchors().nth(index) {
                Some(anchor) => PageAction::CopyLink(anchor.href.clone()),
                None => PageAction::CopyAccount,
            },
        }
    }

    pub fn toggle_profile(&mut self, index: usize, cells: &CellMetrics) {
        if let Some(block) = self.profile.get_mut(index) {
            block.toggle(cells);
        }
    }

    /// Every row of the document, with unrevealed sections left blank.
    pub fn document(
        &self,
        news: &NewsList,
        cells: &CellMetrics,
        accent: Color,
        now_ms: u64,
    ) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for section in &self.sections {
            let section_lines = self.section_lines(section.kind, news, cells, accent);
            let progress = section
                .target
                .map_or(1.0, |t| self.reveal.progress(t, now_ms));
            if progress <= 0.0 {
                lines.extend(section_lines.iter().map(|_| Line::default()));
            } else if progress < 1.0 {
                lines.extend(section_lines.into_iter().map(dim));
            } else {
                lines.extend(section_lines);
            }
        }
        lines
    }

    fn section_lines(
        &self,
        kind: SectionKind,
        news: &NewsList,
        cells: &CellMetrics,
        accent: Color,
    ) -> Vec<Line<'static>> {
        let heading_style = Style::new().fg(accent).bold();
        let heading = |text: &str| Line::from(Span::styled(format!("  {text}"), heading_style));
        let focused = self.focused(news);
        let focus_style = |focus: Focus| {
            if focused == focus {
                Style::new().add_modifier(Modifier::REVERSED)
            } else {
                Style::new()
            }
        };

        let mut lines = Vec::new();
        match kind {
            SectionKind::Hero => {
                lines.push(Line::default());
                lines.push(Line::from(self.content.title.clone()).fg(accent).bold().centered());
                lines.push(Line::from(self.content.subtitle.clone()).gray().centered());
            }
            SectionKind::Intro => {
                lines.extend(
                    self.content
                        .intro
                        .iter()
                        .map(|text| Line::from(format!("  {text}"))),
                );
            }
            SectionKind::Profile => {
                lines.push(heading("Profile"));
                for (index, block) in self.profile.iter().enumerate() {
                    let trigger = Span::styled(
                        format!("[{}] {}", block.icon(), block.title()),
                        focus_style(Focus::Toggle(index)),
                    );
                    let trigger = if block.is_active() {
                        trigger.fg(accent)
                    } else {
                        trigger
                    };
                    lines.push(Line::from(vec![Span::raw("    "), trigger]));
                    lines.extend(
                        block
                            .visible_lines(cells)
                            .iter()
                            .map(|text| Line::from(format!("        {text}")).gray()),
                    );
                }
            }
            SectionKind::Account => {
                lines.push(heading(&self.content.account_label));
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::raw(self.content.account_number.clone()).bold(),
                    Span::raw("   "),
                    Span::styled("[ Copy ]", focus_style(Focus::CopyButton)),
                ]));
            }
            SectionKind::News => {
                lines.push(heading(&self.content.news_heading));
                let mut link = 0;
                for entry in news.entries() {
                    lines.push(match entry {
                        NewsEntry::Link(anchor) => {
                            let style = Style::new().fg(accent).add_modifier(Modifier::UNDERLINED);
                            let title = Span::styled(
                                anchor.title.clone(),
                                style.patch(focus_style(Focus::NewsLink(link))),
                            );
                            link += 1;
                            Line::from(vec![Span::raw("    • "), title])
                        }
                        NewsEntry::Message(message) => Line::from(format!("    {message}")).gray(),
                    });
                }
                if let Some(at) = news.updated_at() {
                    let stamp = format!("    Last updated: {}", at.format("%H:%M:%S"));
                    lines.push(Line::from(stamp).dark_gray());
                }
                if let Focus::NewsLink(index) = focused
                    && let Some(anchor) = news.anchors().nth(index)
                {
                    lines.push(Line::from(format!("    {}", anchor.href)).dark_gray());
                }
            }
            SectionKind::Footer => {
                lines.push(Line::default());
                let footer = format!("· {} ·", self.content.title);
                lines.push(Line::from(footer).dark_gray().centered());
                lines.push(Line::default());
            }
        }
        lines.push(Line::default());
        lines
    }
}

/// Flatten a line to plain dim text, keeping its alignment.
fn dim(line: Line<'static>) -> Line<'static> {
    let alignment = line.alignment;
    let mut dimmed = Line::from(line.to_string()).style(Style::new().fg(Color::DarkGray));
    dimmed.alignment = alignment;
    dimmed
}
