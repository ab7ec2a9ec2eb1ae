use super::Book;

/// Display order for a result list. Borrows the books so the stored list is never reordered.
pub fn project(books: &[Book], sort_by_year: bool) -> Vec<&Book> {
    let mut view: Vec<&Book> = books.iter().collect();
    if sort_by_year {
        // stable: equal years keep their received order
        view.sort_by_key(|book| book.sort_year());
    }
    view
}
