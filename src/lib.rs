pub mod book;
pub mod client;
pub mod config;
pub mod debounce;
pub mod loader;
pub mod logging;
pub mod search;
pub mod tui;
