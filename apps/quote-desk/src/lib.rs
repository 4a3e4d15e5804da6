//! # Quote Desk Shell
//!
//! A thin command-line shell over the quote session.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          quote-desk                                     │
//! │                                                                         │
//! │  run(cli)                                                               │
//! │    │                                                                    │
//! │    ├── Cli::parse()  (clap, in main)                                    │
//! │    ├── SessionConfig::load_or_default(--config)                         │
//! │    ├── init_tracing(config.logging.filter)                              │
//! │    ├── config.store.open()  ──► Arc<dyn DraftStore>                     │
//! │    ├── QuoteManager (defaults from config) + load_draft()               │
//! │    ├── execute(command)      ──► save_draft() if it changed the quote   │
//! │    └── print render_summary(snapshot)                                   │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐ │
//! │  │  quote-session → quote-core (calc, codec, money) + quote-store    │ │
//! │  └───────────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup Sequence
//! 1. Parse arguments
//! 2. Load configuration (file, then `QUOTEDESK_*` environment)
//! 3. Initialize tracing (logging)
//! 4. Open the draft store and restore the last draft
//! 5. Apply the command, save if needed, print the quote

pub mod command;
pub mod error;

use std::fmt::Write as _;

use quote_core::{compute_line_totals, format_currency, QuoteItem, QuoteStatus};
use quote_session::{QuoteManager, QuoteSnapshot, SaveOutcome, SessionConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub use command::{ClientArgs, Cli, Command, ItemArgs, ModeArg};
pub use error::{CliError, CliResult};

/// Runs one parsed invocation.
pub fn run(cli: Cli) -> CliResult<()> {
    let command = cli.selected_command();
    let config = SessionConfig::load_or_default(cli.config);
    init_tracing(&config.logging.filter);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let output = runtime.block_on(open_and_execute(&config, command))?;

    print!("{}", output);
    Ok(())
}

async fn open_and_execute(config: &SessionConfig, command: Command) -> CliResult<String> {
    let store = config.store.open().await?;
    let manager = QuoteManager::builder(store)
        .defaults(config.defaults())
        .open()
        .await;
    execute(&manager, command).await
}

/// Initializes the tracing subscriber for structured logging.
///
/// `RUST_LOG` wins over `filter`. Logs go to stderr so command output
/// stays clean on stdout.
pub fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // A subscriber may already be set (tests, embedding); keep the first one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Applies `command` to `manager` and returns what to print.
pub async fn execute(manager: &QuoteManager, command: Command) -> CliResult<String> {
    let mutates = command.mutates();
    let mut notes = Vec::new();

    match command {
        Command::Show => {}
        Command::Json => {
            let mut json = serde_json::to_string_pretty(&manager.snapshot())?;
            json.push('\n');
            return Ok(json);
        }
        Command::Add(args) => {
            let index = match manager.quote().items.as_slice() {
                [only] if *only == QuoteItem::default() => 0,
                _ => manager.add_item(),
            };
            manager.update_item(index, args.into_item())?;
        }
        Command::Mode { mode } => manager.toggle_tax_inclusive(mode.tax_inclusive()),
        Command::Client(args) => manager.set_client_info(args.into_update()),
        Command::Remove { index } => {
            if !manager.remove_item(index)? {
                notes.push("A quote keeps at least one item; nothing removed.".to_string());
            }
        }
        Command::Send => {
            if manager.save_draft().await == SaveOutcome::Saved {
                manager.mark_sent();
                info!("Quote marked as sent");
            }
        }
    }

    if mutates && manager.save_draft().await == SaveOutcome::Failed {
        notes.push("Draft was NOT saved.".to_string());
    }

    let mut output = render_summary(&manager.snapshot());
    for note in notes {
        let _ = writeln!(output, "{}", note);
    }
    Ok(output)
}

/// Plain-text view of a quote: client block, lines and totals.
///
/// A line whose totals cannot be computed is printed with the error in
/// place of its amounts, and the quote totals are then shown as
/// unavailable.
pub fn render_summary(snapshot: &QuoteSnapshot) -> String {
    let quote = &snapshot.quote;
    let currency = quote.currency_code.as_str();

    let mut out = String::new();
    let mode = if quote.tax_inclusive {
        "tax inclusive"
    } else {
        "tax exclusive"
    };
    let _ = writeln!(out, "Quote [{}] ({})", snapshot.status, mode);
    let _ = writeln!(out, "Client:    {}", blank_as_dash(&quote.client_name));
    let _ = writeln!(out, "Address:   {}", blank_as_dash(&quote.client_address));
    let _ = writeln!(out, "Reference: {}", blank_as_dash(&quote.reference));
    let _ = writeln!(out);

    for (position, item) in quote.items.iter().enumerate() {
        let _ = write!(
            out,
            "{:>3}. {:<24} qty {:<8} ",
            position + 1,
            blank_as_dash(&item.name),
            item.quantity
        );
        let _ = match compute_line_totals(item, quote.tax_mode()) {
            Ok(line) => writeln!(
                out,
                "net {:>16} tax {:>14} total {:>16}",
                format_currency(line.net, currency),
                format_currency(line.tax, currency),
                format_currency(line.total, currency),
            ),
            Err(e) => writeln!(out, "!! {}", e),
        };
    }

    let _ = writeln!(out);
    match quote.totals() {
        Ok(totals) => {
            let money = |amount| format_currency(amount, currency);
            let _ = writeln!(out, "Subtotal:    {}", money(totals.subtotal_net));
            let _ = writeln!(out, "Tax:         {}", money(totals.total_tax));
            let _ = writeln!(out, "Grand total: {}", money(totals.grand_total));
        }
        Err(_) => {
            let _ = writeln!(out, "Totals:      unavailable (fix the marked lines)");
        }
    }

    if snapshot.status != QuoteStatus::Draft {
        let _ = writeln!(out, "Status:      {}", snapshot.status);
    }
    if let Some(err) = &snapshot.last_error {
        let _ = writeln!(out, "Last error:  {}", err);
    }

    out
}

fn blank_as_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}
