use super::app::{AppState, draw, input_view};
use super::widgets::grid_columns;
use crate::book::{Book, SearchResponse};
use crate::client::BookSource;
use crate::config::SearchConfig;
use crate::search::SearchController;
use anyhow::{Result, bail};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Position;
use std::sync::Arc;
use std::thread::sleep;
use std::time::{Duration, Instant};

struct DuneSource;

impl BookSource for DuneSource {
    fn search(&self, query: &str) -> Result<SearchResponse> {
        if query == "offline" {
            bail!("Failed to send search request");
        }
        Ok(SearchResponse {
            docs: vec![Book {
                title: "Dune".into(),
                author_name: Some(vec!["Frank Herbert".into()]),
                first_publish_year: Some(1965),
                isbn: Some(vec!["9780441013593".into()]),
                number_of_pages_median: Some(412),
            }],
        })
    }
}

fn app() -> AppState {
    let source: Arc<dyn BookSource> = Arc::new(DuneSource);
    AppState::new(SearchController::new(source, &SearchConfig::default()))
}

fn press(app: &mut AppState, code: KeyCode, now: Instant) -> bool {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE), now)
}

fn type_text(app: &mut AppState, text: &str, now: Instant) {
    for c in text.chars() {
        press(app, KeyCode::Char(c), now);
    }
}

fn settle(app: &mut AppState, now: Instant) {
    for _ in 0..200 {
        app.on_tick(now);
        if !app.search.is_loading() {
            return;
        }
        sleep(Duration::from_millis(5));
    }
    panic!("fetch did not settle in time");
}

fn screen(app: &mut AppState) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer().clone();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[test]
fn grid_fits_at_least_one_column() {
    assert_eq!(grid_columns(0), 1);
    assert_eq!(grid_columns(40), 1);
    assert_eq!(grid_columns(100), 2);
    assert_eq!(grid_columns(500), 4);
}

#[test]
fn empty_screen_shows_title_placeholder_and_toggle() {
    let mut app = app();
    let text = screen(&mut app);
    assert!(text.contains("OpenLibrary Search"));
    assert!(text.contains("Type to search for books..."));
    assert!(text.contains("[ ] Sort by Year"));
}

#[test]
fn typed_query_renders_cards_after_debounce() {
    let mut app = app();
    let start = Instant::now();
    type_text(&mut app, "dune", start);
    assert_eq!(app.search.query(), "dune");

    app.on_tick(start + Duration::from_millis(2000));
    assert!(app.search.is_loading());
    assert!(screen(&mut app).contains("Loading..."));

    settle(&mut app, start + Duration::from_millis(2000));
    let text = screen(&mut app);
    assert!(!text.contains("Loading..."));
    assert!(text.contains("Dune"));
    assert!(text.contains("Frank Herbert"));
    assert!(text.contains("First Published: 1965"));
    assert!(text.contains("ISBN: 9780441013593"));
    assert!(text.contains("Number of Pages: 412"));
}

#[test]
fn failed_fetch_shows_error_panel() {
    let mut app = app();
    let start = Instant::now();
    type_text(&mut app, "offline", start);
    press(&mut app, KeyCode::Enter, start);
    settle(&mut app, start);

    let text = screen(&mut app);
    assert!(text.contains("Error"));
    assert!(text.contains("Failed to send search request"));
}

#[test]
fn tab_toggles_sort_and_escape_quits() {
    let mut app = app();
    let now = Instant::now();

    assert!(press(&mut app, KeyCode::Tab, now));
    assert!(app.search.sort_by_year());
    assert!(screen(&mut app).contains("[x] Sort by Year"));

    assert!(!press(&mut app, KeyCode::Esc, now));
}

#[test]
fn ctrl_c_quits_without_editing_query() {
    let mut app = app();
    let now = Instant::now();
    let quit = app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), now);
    assert!(!quit);
    assert_eq!(app.search.query(), "");
}

fn cursor(app: &mut AppState) -> Position {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    terminal.draw(|f| draw(f, app)).unwrap();
    terminal.get_cursor_position().unwrap()
}

#[test]
fn backspace_resets_the_grid_scroll() {
    let mut app = app();
    let now = Instant::now();
    type_text(&mut app, "dunes", now);
    press(&mut app, KeyCode::Down, now);
    press(&mut app, KeyCode::Down, now);
    assert_eq!(app.grid.scroll_row(), 2);

    press(&mut app, KeyCode::Backspace, now);
    assert_eq!(app.search.query(), "dune");
    assert_eq!(app.grid.scroll_row(), 0);
}

#[test]
fn countdown_hint_only_shows_for_a_real_query() {
    let mut typed = app();
    type_text(&mut typed, "dune", Instant::now());
    assert!(screen(&mut typed).contains("searching in"));

    let mut blank = app();
    type_text(&mut blank, "  ", Instant::now());
    assert!(!screen(&mut blank).contains("searching in"));
}

#[test]
fn input_view_counts_display_cells() {
    assert_eq!(input_view("", 10), (0, 0));
    assert_eq!(input_view("dune", 10), (0, 4));
    assert_eq!(input_view("書名", 10), (0, 4));
    assert_eq!(input_view("abcdefghij", 10), (1, 9));
    assert_eq!(input_view("abcdefghijkl", 10), (3, 9));
    assert_eq!(input_view("dune", 0), (0, 0));
}

#[test]
fn cursor_follows_wide_characters() {
    let mut app = app();
    type_text(&mut app, "書名", Instant::now());

    // margin + border, then two double-width cells
    assert_eq!(cursor(&mut app), Position::new(6, 3));
}

#[test]
fn long_query_scrolls_to_keep_its_tail_visible() {
    let mut app = app();
    let query = format!("{}TAILEND", "x".repeat(100));
    type_text(&mut app, &query, Instant::now());

    assert!(screen(&mut app).contains("TAILEND"));
    // last cell inside the 96-wide input
    assert_eq!(cursor(&mut app), Position::new(97, 3));
}
