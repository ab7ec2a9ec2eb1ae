use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://openlibrary.org/search.json";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by the TUI and the one-shot search command.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Search endpoint; the query is appended as `?q=`.
    pub endpoint: String,
    /// Quiet period after the last keystroke before a fetch fires.
    pub debounce: Duration,
    /// `None` disables the HTTP timeout.
    pub request_timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            debounce: DEFAULT_DEBOUNCE,
            request_timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            user_agent: format!("bookcrab/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SearchConfig {
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// A zero timeout means "wait forever".
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        self
    }
}
