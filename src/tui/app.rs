use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::{Frame, Terminal};
use tracing::{debug, info};
use unicode_width::UnicodeWidthStr;

use super::widgets::{BookGridState, render_book_grid};
use crate::client::{BookSource, OpenLibraryClient};
use crate::config::SearchConfig;
use crate::search::SearchController;
use crate::tui::theme::{flexoki, rgb};

const TITLE: &str = "OpenLibrary Search";
const PLACEHOLDER: &str = "Type to search for books...";
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub struct AppState {
    pub(super) search: SearchController,
    pub(super) grid: BookGridState,
    spinner_frame: usize,
}

impl AppState {
    pub fn new(search: SearchController) -> Self {
        Self {
            search,
            grid: BookGridState::default(),
            spinner_frame: 0,
        }
    }

    /// Returns `false` once the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }

        match key.code {
            KeyCode::Esc => {
                info!("TUI quit requested");
                return false;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                info!("TUI quit requested");
                return false;
            }
            KeyCode::Tab => {
                self.search.toggle_sort();
                self.grid.reset();
            }
            KeyCode::Enter => {
                debug!("Search submitted without waiting for debounce");
                self.search.submit();
                self.grid.reset();
            }
            KeyCode::Backspace => {
                self.search.pop_char(now);
                self.grid.reset();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.search.push_char(c, now);
                self.grid.reset();
            }
            KeyCode::Down => self.grid.scroll_down(1),
            KeyCode::Up => self.grid.scroll_up(1),
            KeyCode::PageDown => self.grid.scroll_down(self.grid.visible_rows()),
            KeyCode::PageUp => self.grid.scroll_up(self.grid.visible_rows()),
            _ => {}
        }
        true
    }

    pub fn on_tick(&mut self, now: Instant) {
        let was_loading = self.search.is_loading();
        self.search.tick(now);
        if self.search.is_loading() {
            self.spinner_frame = (self.spinner_frame + 1) % SPINNER.len();
        } else if was_loading {
            self.grid.reset();
        }
    }
}

pub fn draw(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Query input
            Constraint::Length(1), // Sort toggle
            Constraint::Min(0),    // Results
            Constraint::Length(1), // Footer
        ])
        .split(f.area());

    let title = Paragraph::new(Line::from(Span::styled(
        TITLE,
        Style::default()
            .fg(rgb(flexoki::BLUE_400))
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let query = app.search.query();
    let (scroll, cursor_col) = input_view(query, chunks[1].width.saturating_sub(2));
    let input = if query.is_empty() {
        Paragraph::new(Span::styled(
            PLACEHOLDER,
            Style::default().fg(rgb(flexoki::BASE_500)),
        ))
    } else {
        Paragraph::new(query.to_string()).scroll((0, scroll))
    }
    .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(input, chunks[1]);

    f.set_cursor_position(Position::new(
        chunks[1].x + 1 + cursor_col,
        chunks[1].y + 1,
    ));

    let (mark, mark_color) = if app.search.sort_by_year() {
        ("[x]", flexoki::GREEN_400)
    } else {
        ("[ ]", flexoki::BASE_500)
    };
    let mut toggle_line = vec![
        Span::styled(mark, Style::default().fg(rgb(mark_color))),
        Span::raw(" Sort by Year"),
    ];
    if let Some(wait) = app.search.time_until_fetch(Instant::now()) {
        toggle_line.push(Span::styled(
            format!("   searching in {:.1}s", wait.as_secs_f32()),
            Style::default().fg(rgb(flexoki::BASE_500)),
        ));
    }
    let toggle = Paragraph::new(Line::from(toggle_line));
    f.render_widget(toggle, chunks[2]);

    draw_results(f, app, chunks[3]);

    let footer = Paragraph::new(
        "Type to search | Enter: Search now | Tab: Sort by Year | ↑/↓ PgUp/PgDn: Scroll | Esc: Quit",
    )
    .style(Style::default().fg(rgb(flexoki::BASE_500)));
    f.render_widget(footer, chunks[4]);
}

/// Horizontal scroll and cursor column for the query inside an input `inner_width` cells wide.
///
/// Columns are display cells, so wide characters count twice. Once the query no longer fits,
/// the view scrolls to keep its tail and the cursor visible in the last cell.
pub(super) fn input_view(query: &str, inner_width: u16) -> (u16, u16) {
    if inner_width == 0 {
        return (0, 0);
    }
    let width = u16::try_from(query.width()).unwrap_or(u16::MAX);
    if width < inner_width {
        (0, width)
    } else {
        (width - (inner_width - 1), inner_width - 1)
    }
}

fn draw_results(f: &mut Frame, app: &mut AppState, area: ratatui::layout::Rect) {
    if app.search.is_loading() {
        let spinner_area = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45),
                Constraint::Length(1),
                Constraint::Percentage(45),
            ])
            .split(area)[1];
        let spinner = Paragraph::new(format!("{} Loading...", SPINNER[app.spinner_frame]))
            .style(Style::default().fg(rgb(flexoki::YELLOW_400)))
            .alignment(Alignment::Center);
        f.render_widget(spinner, spinner_area);
        return;
    }

    let mut cards_area = area;
    if let Some(err) = app.search.error() {
        let sections = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(area);
        let p = Paragraph::new(err.to_string())
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .style(Style::default().fg(rgb(flexoki::RED_400)))
            .wrap(Wrap { trim: true });
        f.render_widget(p, sections[0]);
        cards_area = sections[1];
    }

    let books = app.search.sorted_books();
    render_book_grid(f, cards_area, &books, &mut app.grid);
}

pub fn run_tui(config: SearchConfig) -> Result<()> {
    info!(endpoint = %config.endpoint, "Starting TUI application");
    let source: Arc<dyn BookSource> = Arc::new(OpenLibraryClient::new(&config)?);
    let mut app = AppState::new(SearchController::new(source, &config));

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), terminal::LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    app.search.shutdown();
    info!("TUI application exited");
    result
}

fn event_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut AppState) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|f| draw(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if !app.handle_key(key, Instant::now()) {
                    return Ok(());
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick(Instant::now());
            last_tick = Instant::now();
        }
    }
}
