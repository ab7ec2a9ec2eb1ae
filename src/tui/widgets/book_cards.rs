use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::book::Book;
use crate::book::format::BookCard;
use crate::tui::theme::{flexoki, rgb};

const CARD_HEIGHT: u16 = 7;
const CARD_MIN_WIDTH: u16 = 34;
const MAX_COLUMNS: usize = 4;

/// Scroll position of the card grid, in grid rows.
#[derive(Debug, Default)]
pub struct BookGridState {
    scroll_row: usize,
    visible_rows: usize,
}

impl BookGridState {
    pub fn scroll_row(&self) -> usize {
        self.scroll_row
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows.max(1)
    }

    pub fn scroll_down(&mut self, rows: usize) {
        self.scroll_row = self.scroll_row.saturating_add(rows);
    }

    pub fn scroll_up(&mut self, rows: usize) {
        self.scroll_row = self.scroll_row.saturating_sub(rows);
    }

    pub fn reset(&mut self) {
        self.scroll_row = 0;
    }

    fn clamp(&mut self, total_rows: usize) {
        self.scroll_row = self.scroll_row.min(total_rows.saturating_sub(1));
    }
}

/// Columns that fit in `width`, at least one.
pub fn grid_columns(width: u16) -> usize {
    ((width / CARD_MIN_WIDTH) as usize).clamp(1, MAX_COLUMNS)
}

fn book_card(book: &Book) -> Paragraph<'static> {
    let card = BookCard::from_book(book);
    let label = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default()
                .fg(rgb(flexoki::PAPER))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.authors.clone(),
            Style::default().fg(rgb(flexoki::BASE_500)),
        )),
    ];
    for (name, value) in card.labelled_fields() {
        lines.push(Line::from(vec![
            Span::styled(name, label),
            Span::raw(" "),
            Span::raw(value.to_string()),
        ]));
    }

    Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb(flexoki::BASE_300))),
    )
}

pub fn render_book_grid(frame: &mut Frame, area: Rect, books: &[&Book], state: &mut BookGridState) {
    if books.is_empty() || area.height == 0 {
        return;
    }

    let columns = grid_columns(area.width);
    let total_rows = books.len().div_ceil(columns);
    state.visible_rows = (area.height / CARD_HEIGHT) as usize;
    state.clamp(total_rows);

    let mut y = area.y;
    for row in books.chunks(columns).skip(state.scroll_row) {
        if y >= area.bottom() {
            break;
        }
        let row_area = Rect {
            x: area.x,
            y,
            width: area.width,
            height: CARD_HEIGHT.min(area.bottom() - y),
        };
        let cells =
            Layout::horizontal(vec![Constraint::Ratio(1, columns as u32); columns]).split(row_area);
        for (book, cell) in row.iter().zip(cells.iter()) {
            frame.render_widget(book_card(book), *cell);
        }
        y = y.saturating_add(CARD_HEIGHT);
    }
}
