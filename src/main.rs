use anyhow::{Context, Result};
use bookcrab::book::format::render_cards_text;
use bookcrab::book::sort;
use bookcrab::client::{BookSource, OpenLibraryClient};
use bookcrab::config::{DEFAULT_DEBOUNCE, DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT, SearchConfig};
use bookcrab::logging::{LogDestination, init_logging};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::level_filters::LevelFilter;
use tracing::info;

/// Search Open Library from the terminal.
#[derive(Parser)]
#[command(name = "bookcrab")]
#[command(version)]
#[command(about = "Debounced Open Library search with sortable result cards", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct GlobalArgs {
    /// Search endpoint; the query is sent as `?q=`
    #[arg(long, global = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// HTTP request timeout in seconds (0 disables it)
    #[arg(long, global = true, default_value_t = DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,

    /// Log file used when not logging to stderr
    #[arg(long, global = true, default_value = "bookcrab.log")]
    log_file: PathBuf,

    /// Log to stderr instead of the log file (ignored by the TUI)
    #[arg(long, global = true)]
    log_stderr: bool,

    /// Default log level; RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive search widget (default)
    Tui {
        /// Quiet period after the last keystroke before searching
        #[arg(long, default_value_t = DEFAULT_DEBOUNCE.as_millis() as u64)]
        debounce_ms: u64,
    },

    /// Run one search and print the result cards
    Search {
        /// Search text (use -- before it if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Order results by first publish year, unknown years first
        #[arg(long)]
        sort_by_year: bool,

        /// Print the decoded docs as JSON instead of cards
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let command = cli.command.unwrap_or(Commands::Tui {
        debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
    });
    let global = cli.global;

    let destination = match command {
        Commands::Search { .. } if global.log_stderr => LogDestination::Stderr,
        _ => LogDestination::File(global.log_file.clone()),
    };
    let _guard = init_logging(&destination, global.log_level)?;

    let config = SearchConfig::default()
        .with_endpoint(global.endpoint)
        .with_timeout_secs(global.timeout_secs);

    match command {
        Commands::Tui { debounce_ms } => {
            bookcrab::tui::run_tui(config.with_debounce(Duration::from_millis(debounce_ms)))
        }
        Commands::Search {
            query,
            sort_by_year,
            json,
        } => cmd_search(&config, &query, sort_by_year, json),
    }
}

fn cmd_search(config: &SearchConfig, query: &str, sort_by_year: bool, json: bool) -> Result<()> {
    if query.trim().is_empty() {
        info!("Blank query; nothing to search");
        return Ok(());
    }

    let client = OpenLibraryClient::new(config)?;
    info!(endpoint = client.endpoint(), query, "Running one-shot search");
    let response = client.search(query)?;
    let books = sort::project(&response.docs, sort_by_year);

    if json {
        let out = serde_json::to_string_pretty(&books).context("Failed to encode results")?;
        println!("{}", out);
    } else {
        print!("{}", render_cards_text(books));
    }
    Ok(())
}
