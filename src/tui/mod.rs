//! Interactive search screen. Built only with the `tui` feature; without it the
//! `tui` subcommand reports how to get a working build.

#[cfg(feature = "tui")]
mod app;
#[cfg(feature = "tui")]
pub mod theme;
#[cfg(feature = "tui")]
pub mod widgets;

#[cfg(all(test, feature = "tui"))]
mod tests;

#[cfg(feature = "tui")]
pub use app::run_tui;

#[cfg(not(feature = "tui"))]
pub fn run_tui(_config: crate::config::SearchConfig) -> anyhow::Result<()> {
    anyhow::bail!(
        "bookcrab was built without the `tui` feature; use `bookcrab search <QUERY>` or rebuild with --features tui"
    )
}
