//! Search widget state: the query, the fetched books, the loading flag and the sort toggle.
//!
//! Keystrokes go through [`SearchController::set_query`], which re-arms a single
//! debouncer. [`SearchController::tick`] is called from the event loop; it fires the
//! debounced fetch once input has been quiet for the configured delay and applies
//! any finished fetch.

use crate::book::Book;
use crate::book::sort;
use crate::client::BookSource;
use crate::config::SearchConfig;
use crate::debounce::Debouncer;
use crate::loader::{FetchController, FetchStatus};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};


pub struct SearchController {
    query: String,
    books: Vec<Book>,
    sort_by_year: bool,
    error: Option<String>,
    debouncer: Debouncer<String>,
    fetches: FetchController,
}

impl SearchController {
    pub fn new(source: Arc<dyn BookSource>, config: &SearchConfig) -> Self {
        Self {
            query: String::new(),
            books: Vec::new(),
            sort_by_year: false,
            error: None,
            debouncer: Debouncer::new(config.debounce),
            fetches: FetchController::new(source),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn is_loading(&self) -> bool {
        self.fetches.is_loading()
    }

    pub fn sort_by_year(&self) -> bool {
        self.sort_by_year
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn has_pending_fetch(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time left before the pending query is searched. `None` when nothing is pending or the
    /// pending query is blank, since that only clears the results.
    pub fn time_until_fetch(&self, now: Instant) -> Option<Duration> {
        match self.debouncer.pending() {
            Some(query) if !query.trim().is_empty() => self.debouncer.time_until_ready(now),
            _ => None,
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>, now: Instant) {
        self.query = query.into();
        debug!(query = %self.query, "Query changed; re-arming debounce");
        self.debouncer.schedule(self.query.clone(), now);
    }

    pub fn push_char(&mut self, c: char, now: Instant) {
        let mut query = std::mem::take(&mut self.query);
        query.push(c);
        self.set_query(query, now);
    }

    pub fn pop_char(&mut self, now: Instant) {
        let mut query = std::mem::take(&mut self.query);
        query.pop();
        self.set_query(query, now);
    }

    pub fn toggle_sort(&mut self) {
        self.sort_by_year = !self.sort_by_year;
        debug!(sort_by_year = self.sort_by_year, "Sort toggled");
    }

    /// Starts a fetch right away. Blank queries clear the results without touching the network.
    pub fn fetch(&mut self, query: &str) {
        if query.trim().is_empty() {
            debug!("Blank query; clearing results");
            self.fetches.cancel();
            self.books.clear();
            self.error = None;
            return;
        }

        self.error = None;
        let seq = self.fetches.start(query.to_string());
        info!(seq, query, "Fetch started");
    }

    /// Fetches the current query now instead of waiting out the debounce.
    pub fn submit(&mut self) {
        self.debouncer.cancel();
        let query = self.query.clone();
        self.fetch(&query);
    }

    /// Applies finished fetches, then fires the debounced one if its quiet period is over.
    pub fn tick(&mut self, now: Instant) {
        self.poll_fetches();
        if let Some(query) = self.debouncer.poll(now) {
            self.fetch(&query);
        }
    }

    pub fn poll_fetches(&mut self) {
        match self.fetches.poll() {
            FetchStatus::Ready { query, docs } => {
                info!(query = %query, docs = docs.len(), "Results replaced");
                self.books = docs;
            }
            FetchStatus::Error(error) => {
                warn!(error = %error, "Keeping previous results after failed fetch");
                self.error = Some(error);
            }
            FetchStatus::Loading | FetchStatus::Idle => {}
        }
    }

    pub fn sorted_books(&self) -> Vec<&Book> {
        sort::project(&self.books, self.sort_by_year)
    }

    /// Drops the pending debounce and ignores whatever is still in flight.
    pub fn shutdown(&mut self) {
        if let Some(query) = self.debouncer.cancel() {
            debug!(query = %query, "Discarding pending debounced fetch");
        }
        self.fetches.cancel();
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
