use crate::book::Book;
use crate::client::BookSource;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{debug, error, info, warn};


/// Message sent back from a fetch worker, tagged with the sequence number it was issued under.
pub enum LoadStatus {
    Loaded {
        seq: u64,
        query: String,
        docs: Vec<Book>,
    },
    Error {
        seq: u64,
        error: String,
    },
}

impl LoadStatus {
    fn seq(&self) -> u64 {
        match self {
            LoadStatus::Loaded { seq, .. } | LoadStatus::Error { seq, .. } => *seq,
        }
    }
}

/// Runs each search on its own worker thread and collects the replies on one channel.
pub struct Loader {
    source: Arc<dyn BookSource>,
    tx: Sender<LoadStatus>,
    rx: Receiver<LoadStatus>,
    issued: u64,
}

impl Loader {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            source,
            tx,
            rx,
            issued: 0,
        }
    }

    pub fn spawn(&mut self, query: String) -> u64 {
        self.issued += 1;
        let seq = self.issued;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        info!(seq, query = %query, "Spawning fetch thread");

        thread::spawn(move || {
            // a panicking source still has to end the fetch, or loading never clears
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| source.search(&query)));
            let status = match outcome {
                Ok(Ok(response)) => LoadStatus::Loaded {
                    seq,
                    query,
                    docs: response.docs,
                },
                Err(payload) => {
                    let reason = panic_message(payload.as_ref());
                    error!(seq, query = %query, reason = %reason, "Search worker panicked");
                    LoadStatus::Error {
                        seq,
                        error: format!("Search worker panicked: {reason}"),
                    }
                }
                Ok(Err(e)) => {
                    error!(seq, query = %query, error = ?e, "Search request failed");
                    LoadStatus::Error {
                        seq,
                        error: format!("{e:#}"),
                    }
                }
            };
            // receiver is gone once the controller is dropped
            let _ = tx.send(status);
        });

        seq
    }

    /// Marks everything issued so far as stale without touching the workers.
    pub fn invalidate(&mut self) {
        self.issued += 1;
    }

    pub fn latest(&self) -> u64 {
        self.issued
    }

    pub fn try_recv(&self) -> Option<LoadStatus> {
        self.rx.try_recv().ok()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub enum FetchStatus {
    Loading,
    Ready { query: String, docs: Vec<Book> },
    Error(String),
    Idle,
}

/// Applies only the reply to the most recently issued fetch.
pub struct FetchController {
    loader: Loader,
    awaiting: bool,
}

impl FetchController {
    pub fn new(source: Arc<dyn BookSource>) -> Self {
        Self {
            loader: Loader::new(source),
            awaiting: false,
        }
    }

    pub fn start(&mut self, query: String) -> u64 {
        self.awaiting = true;
        self.loader.spawn(query)
    }

    pub fn cancel(&mut self) {
        if self.awaiting {
            debug!(seq = self.loader.latest(), "Cancelling in-flight fetch");
        }
        self.loader.invalidate();
        self.awaiting = false;
    }

    pub fn is_loading(&self) -> bool {
        self.awaiting
    }

    pub fn poll(&mut self) -> FetchStatus {
        while let Some(message) = self.loader.try_recv() {
            let seq = message.seq();
            if seq != self.loader.latest() {
                warn!(seq, latest = self.loader.latest(), "Dropping stale search result");
                continue;
            }

            self.awaiting = false;
            return match message {
                LoadStatus::Loaded { query, docs, .. } => {
                    info!(seq, docs = docs.len(), "Fetch completed");
                    FetchStatus::Ready { query, docs }
                }
                LoadStatus::Error { error, .. } => FetchStatus::Error(error),
            };
        }

        if self.awaiting {
            FetchStatus::Loading
        } else {
            FetchStatus::Idle
        }
    }
}
