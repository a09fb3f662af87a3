//! Application state and TUI event loop for flix-report.
//!
//! [`App`] owns the theme, the rendered content (a report or an error) and
//! the current page / scroll position.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Tabs,
    Frame, Terminal,
};

use flix_data::profile::DatasetOverview;
use flix_data::Report;

use crate::error_view::ErrorView;
use crate::report_view;
use crate::themes::Theme;

// ── Content ───────────────────────────────────────────────────────────────────

/// What the TUI shows.
#[derive(Debug, Clone)]
pub enum Content {
    /// Overview page followed by one page per section.
    Report {
        overview: Box<DatasetOverview>,
        report: Box<Report>,
    },
    /// A single error page.
    Error(ErrorView),
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the report TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    pub content: Content,
    /// Index of the page on screen; 0 is the overview.
    pub page: usize,
    /// Vertical scroll offset within the page.
    pub scroll: u16,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    /// App browsing a finished report.
    pub fn new(theme_name: &str, overview: DatasetOverview, report: Report) -> Self {
        Self::with_content(
            theme_name,
            Content::Report {
                overview: Box::new(overview),
                report: Box::new(report),
            },
        )
    }

    /// App showing a failed run.
    pub fn with_error(theme_name: &str, error: ErrorView) -> Self {
        Self::with_content(theme_name, Content::Error(error))
    }

    fn with_content(theme_name: &str, content: Content) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            content,
            page: 0,
            scroll: 0,
            should_quit: false,
        }
    }

    // ── Paging ────────────────────────────────────────────────────────────────

    pub fn page_count(&self) -> usize {
        match &self.content {
            Content::Report { report, .. } => report.sections.len() + 1,
            Content::Error(_) => 1,
        }
    }

    /// Tab labels, one per page.
    pub fn page_titles(&self) -> Vec<String> {
        match &self.content {
            Content::Report { report, .. } => std::iter::once("Overview".to_string())
                .chain(report.sections.iter().map(|s| s.title.clone()))
                .collect(),
            Content::Error(_) => vec!["Error".to_string()],
        }
    }

    pub fn next_page(&mut self) {
        self.page = (self.page + 1) % self.page_count();
        self.scroll = 0;
    }

    pub fn previous_page(&mut self) {
        let count = self.page_count();
        self.page = (self.page + count - 1) % count;
        self.scroll = 0;
    }

    /// Apply one key press.
    ///
    /// `←/→` and `Tab`/`Shift+Tab` switch pages, `↑/↓` and `PgUp/PgDn`
    /// scroll, `q`, `Esc` and `Ctrl+C` quit.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Tab => self.next_page(),
            KeyCode::Left | KeyCode::BackTab => self.previous_page(),
            KeyCode::Down => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up => self.scroll = self.scroll.saturating_sub(1),
            KeyCode::PageDown => self.scroll = self.scroll.saturating_add(10),
            KeyCode::PageUp => self.scroll = self.scroll.saturating_sub(10),
            KeyCode::Home => self.scroll = 0,
            _ => {}
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Polls the terminal with a 250 ms timeout and redraws after every
    /// event.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(err) = terminal.draw(|frame| self.render(frame)) {
                break Err(err);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(_) => {}
                    Err(err) => break Err(err),
                },
                Ok(false) => {}
                Err(err) => break Err(err),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current page into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [tabs_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let tabs = Tabs::new(self.page_titles())
            .select(self.page)
            .style(self.theme.tab_inactive)
            .highlight_style(self.theme.tab_active)
            .divider(Span::styled("|", self.theme.separator));
        frame.render_widget(tabs, tabs_area);

        match &self.content {
            Content::Error(error) => {
                report_view::render_error(frame, body_area, error, &self.theme);
            }
            Content::Report { overview, report } => {
                if self.page == 0 {
                    report_view::render_overview(frame, body_area, overview, self.scroll, &self.theme);
                } else if let Some(section) = report.sections.get(self.page - 1) {
                    report_view::render_section(frame, body_area, section, self.scroll, &self.theme);
                }
            }
        }

        let footer = Line::from(vec![
            Span::styled(
                format!(" {}/{} ", self.page + 1, self.page_count()),
                self.theme.label,
            ),
            Span::styled(
                "←/→ page  ↑/↓ scroll  q quit",
                self.theme.dim,
            ),
        ]);
        frame.render_widget(footer, footer_area);
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
