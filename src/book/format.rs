use super::Book;
use std::fmt::Write as _;

pub const NOT_AVAILABLE: &str = "N/A";

/// Display strings for one result card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub title: String,
    pub authors: String,
    pub first_published: String,
    pub isbn: String,
    pub pages: String,
}

impl BookCard {
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            authors: BookFormatter::authors(book),
            first_published: BookFormatter::year(book),
            isbn: BookFormatter::isbn(book),
            pages: BookFormatter::pages(book),
        }
    }

    pub fn labelled_fields(&self) -> [(&'static str, &str); 3] {
        [
            ("First Published:", self.first_published.as_str()),
            ("ISBN:", self.isbn.as_str()),
            ("Number of Pages:", self.pages.as_str()),
        ]
    }
}

pub struct BookFormatter;

impl BookFormatter {
    pub fn authors(book: &Book) -> String {
        book.authors().unwrap_or_default()
    }

    /// Unknown years render as nothing; only sorting substitutes 0.
    pub fn year(book: &Book) -> String {
        book.first_publish_year
            .map(|year| year.to_string())
            .unwrap_or_default()
    }

    pub fn isbn(book: &Book) -> String {
        book.first_isbn()
            .map(str::to_string)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string())
    }

    pub fn pages(book: &Book) -> String {
        match book.number_of_pages_median {
            Some(pages) if pages > 0 => pages.to_string(),
            _ => NOT_AVAILABLE.to_string(),
        }
    }
}

/// Plain-text rendition of the card grid, one card per block.
pub fn render_cards_text<'a>(books: impl IntoIterator<Item = &'a Book>) -> String {
    let mut out = String::new();
    for book in books {
        let card = BookCard::from_book(book);
        let _ = writeln!(out, "{}", card.title);
        let _ = writeln!(out, "  {}", card.authors);
        for (label, value) in card.labelled_fields() {
            let _ = writeln!(out, "  {} {}", label, value);
        }
        out.push('\n');
    }
    out
}
