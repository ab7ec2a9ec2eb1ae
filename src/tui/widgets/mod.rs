mod book_cards;

pub use book_cards::{BookGridState, grid_columns, render_book_grid};
