use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use folio_config::Config;
use folio_core::{CellMetrics, ColorTheme, SurfaceSize};
use folio_particles::{DisplayList, ParticleCanvas, ParticleField};
use log::{info, warn};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Paragraph},
};

mod cli;
mod clipboard;
mod collapsible;
mod logging;
mod navbar;
mod news;
mod page;
mod reveal;
mod toast;

use cli::Cli;
use clipboard::{
    COPIED_MESSAGE, Clipboard, LINK_COPIED_MESSAGE, Osc52Clipboard, copy_with_feedback,
};
use navbar::{NavbarShadow, ShadowRule};
use news::{NewsList, NewsMonitor};
use page::{Page, PageAction};
use toast::Toast;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    let log_path = logging::init(cli.log_level, cli.log_file.clone())?;

    let mut config = load_config(&cli);
    cli.apply(&mut config);
    info!("starting folio, logging to {}", log_path.display());

    let news = (!cli.offline).then(|| NewsMonitor::from_config(&config.news));
    let terminal = ratatui::init();
    let result = App::new(config, Box::new(Osc52Clipboard), news).run(terminal);
    ratatui::restore();
    result
}

/// Load the configuration, falling back to defaults on any error.
fn load_config(cli: &Cli) -> Config {
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    loaded.unwrap_or_else(|e| {
        warn!("{e}; using default configuration");
        Config::default()
    })
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    cells: CellMetrics,
    theme: ColorTheme,
    page: Page,
    /// Background animation; `None` until the first frame or when disabled.
    particles: Option<ParticleField>,
    /// Last recorded particle frame.
    particle_frame: DisplayList,
    /// Size of the whole terminal area in pixels.
    surface: Option<SurfaceSize>,
    /// Rows available to the page below the navbar.
    viewport_rows: u16,
    shadow: NavbarShadow,
    toast: Toast,
    clipboard: Box<dyn Clipboard>,
    news: Option<NewsMonitor>,
    started: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config, clipboard: Box<dyn Clipboard>, news: Option<NewsMonitor>) -> Self {
        Self {
            running: false,
            cells: config.display.cells(),
            theme: config.display.theme,
            page: Page::new(config.page.clone()),
            particles: None,
            particle_frame: DisplayList::new(),
            surface: None,
            viewport_rows: 0,
            shadow: NavbarShadow::Flat,
            toast: Toast::new(),
            clipboard,
            news,
            started: Instant::now(),
            config,
        }
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        if let Some(news) = &self.news {
            news.start();
        }
        while self.running {
            let now_ms = self.started.elapsed().as_millis() as u64;
            terminal.draw(|frame| {
                self.on_frame(frame.area(), now_ms);
                self.render(frame, now_ms);
            })?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Current news list.
    fn news_list(&self) -> NewsList {
        match &self.news {
            Some(monitor) => monitor.snapshot(),
            None => NewsList::disabled(),
        }
    }

    /// Advance everything that changes per frame.
    fn on_frame(&mut self, area: Rect, now_ms: u64) {
        let surface = self.cells.surface(area.width, area.height);
        if self.surface != Some(surface) {
            self.on_resize(area, surface);
        }
        if let Some(field) = &mut self.particles {
            field.tick(&mut self.particle_frame);
        }
        let news = self.news_list();
        self.page
            .update_reveal(&news, &self.cells, self.viewport_rows, now_ms);
        self.toast.update(now_ms);
    }

    /// The terminal changed size: reconfigure the background and the viewport.
    fn on_resize(&mut self, area: Rect, surface: SurfaceSize) {
        let first = self.surface.is_none();
        self.surface = Some(surface);
        self.viewport_rows = area.height.saturating_sub(3);

        if first {
            let container = self.config.display.particles.then_some(surface);
            self.particles = ParticleField::start(container);
        } else if let Some(field) = &mut self.particles {
            field.resize(surface);
        }
        // Keep the scroll position valid for the new viewport.
        self.scroll(0);
    }

    fn on_scroll(&mut self) {
        self.shadow = NavbarShadow::for_scroll(self.page.scroll_px());
    }

    fn scroll(&mut self, rows: i32) {
        let rows_total = self.page.content_rows(&self.news_list(), &self.cells);
        self.page
            .scroll_by(rows, &self.cells, rows_total, self.viewport_rows);
        self.on_scroll();
    }

    fn scroll_to_bottom(&mut self) {
        let rows_total = self.page.content_rows(&self.news_list(), &self.cells);
        self.page
            .scroll_to_bottom(&self.cells, rows_total, self.viewport_rows);
        self.on_scroll();
    }

    fn background(&self) -> (u8, u8, u8) {
        let [r, g, b] = self.config.display.background;
        (r, g, b)
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame, now_ms: u64) {
        let area = frame.area();
        let color = self.theme.color();
        let bg = self.background();

        let page_bg = Style::new().bg(Color::Rgb(bg.0, bg.1, bg.2));
        frame.render_widget(Block::new().style(page_bg), area);
        if self.particles.is_some() {
            frame.render_widget(ParticleCanvas::new(&self.particle_frame, bg), area);
        }

        let chunks = Layout::vertical([
            Constraint::Length(1), // Navbar
            Constraint::Length(1), // Navbar shadow
            Constraint::Fill(1),   // Page
            Constraint::Length(1), // Help text
        ])
        .split(area);

        let navbar = Line::from(vec![
            format!(" {} ", self.page.title()).bold().fg(color),
            " profile · account · news".dark_gray(),
        ]);
        frame.render_widget(navbar, chunks[0]);
        frame.render_widget(
            ShadowRule {
                shadow: self.shadow,
                background: bg,
            },
            chunks[1],
        );

        let news = self.news_list();
        let document = self.page.document(&news, &self.cells, color, now_ms);
        let scroll_rows = self.cells.px_to_rows(self.page.scroll_px()) as u16;
        frame.render_widget(Paragraph::new(document).scroll((scroll_rows, 0)), chunks[2]);

        let help = Line::from(vec![
            "q".bold().fg(color),
            " quit  ".dark_gray(),
            "j/k".bold().fg(color),
            " scroll  ".dark_gray(),
            "tab".bold().fg(color),
            " focus  ".dark_gray(),
            "enter".bold().fg(color),
            " open/copy  ".dark_gray(),
            "y".bold().fg(color),
            " copy account  ".dark_gray(),
            "c".bold().fg(color),
            " cycle color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, chunks[3]);

        self.toast.render(frame, chunks[2], color);
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits at most one frame interval so the animation keeps running.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        let timeout = Duration::from_millis(self.config.display.frame_interval_ms);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                // Resizes are picked up by `on_frame` from the new frame area.
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        let now_ms = self.started.elapsed().as_millis() as u64;
        let page_rows = i32::from(self.viewport_rows.saturating_sub(1).max(1));
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('j') | KeyCode::Down) => self.scroll(1),
            (_, KeyCode::Char('k') | KeyCode::Up) => self.scroll(-1),
            (_, KeyCode::PageDown) => self.scroll(page_rows),
            (_, KeyCode::PageUp) => self.scroll(-page_rows),
            (_, KeyCode::Home | KeyCode::Char('g')) => {
                self.page.scroll_to_top();
                self.on_scroll();
            }
            (_, KeyCode::End | KeyCode::Char('G')) => self.scroll_to_bottom(),
            (_, KeyCode::Tab) => {
                let news = self.news_list();
                self.page.focus_next(&news);
            }
            (_, KeyCode::BackTab) => {
                let news = self.news_list();
                self.page.focus_prev(&news);
            }
            (_, KeyCode::Enter | KeyCode::Char(' ')) => self.activate(now_ms),
            (_, KeyCode::Char('y')) => self.copy_account(now_ms),
            (_, KeyCode::Char('c')) => self.cycle_color_theme(),
            _ => {}
        }
    }

    fn activate(&mut self, now_ms: u64) {
        let news = self.news_list();
        match self.page.activate(&news, &self.cells) {
            PageAction::Toggled(_) => self.scroll(0),
            PageAction::CopyAccount => self.copy_account(now_ms),
            PageAction::CopyLink(href) => {
                copy_with_feedback(
                    self.clipboard.as_mut(),
                    &href,
                    LINK_COPIED_MESSAGE,
                    &mut self.toast,
                    now_ms,
                );
            }
        }
    }

    fn copy_account(&mut self, now_ms: u64) {
        let text = self.page.account_number().to_string();
        copy_with_feedback(
            self.clipboard.as_mut(),
            &text,
            COPIED_MESSAGE,
            &mut self.toast,
            now_ms,
        );
    }

    /// Cycle through available color themes.
    fn cycle_color_theme(&mut self) {
        self.theme = self.theme.next();
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}
