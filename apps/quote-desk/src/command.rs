//! # Command Line
//!
//! `clap` derive definitions for one `quote-desk` invocation.
//!
//! ```text
//! quote-desk [--config <PATH>] [COMMAND]
//!
//!   show | json | add | mode | client | remove | send
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use quote_core::{ClientInfoUpdate, QuoteItem};

#[derive(Debug, Parser)]
#[command(name = "quote-desk")]
#[command(version, about = "Edit the saved sales quote draft", long_about = None)]
pub struct Cli {
    /// Config file (defaults to quotedesk.toml in the platform config dir)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// The requested command; `show` when none was given.
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Show)
    }
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the current quote (default)
    Show,
    /// Print the session snapshot as JSON
    Json,
    /// Add a line item (fills the blank first line of a fresh quote)
    Add(ItemArgs),
    /// Switch tax mode
    Mode {
        #[arg(value_enum, ignore_case = true)]
        mode: ModeArg,
    },
    /// Set client details
    Client(ClientArgs),
    /// Remove a line item
    Remove {
        /// Line number as printed by `show` (1-based)
        #[arg(value_name = "LINE", value_parser = line_index)]
        index: usize,
    },
    /// Save the draft and mark it sent
    Send,
}

impl Command {
    /// True for commands that change the quote and should be saved.
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::Add(_) | Command::Mode { .. } | Command::Client(_) | Command::Remove { .. }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct ItemArgs {
    pub name: String,
    #[arg(allow_negative_numbers = true, value_parser = finite_number)]
    pub qty: f64,
    #[arg(allow_negative_numbers = true, value_parser = finite_number)]
    pub rate: f64,
    /// Discount per unit
    #[arg(allow_negative_numbers = true, value_parser = finite_number, default_value_t = 0.0)]
    pub discount: f64,
    /// Tax percentage, e.g. 18
    #[arg(allow_negative_numbers = true, value_parser = finite_number, default_value_t = 0.0)]
    pub tax_pct: f64,
}

impl ItemArgs {
    pub fn into_item(self) -> QuoteItem {
        QuoteItem::new(self.name, self.qty, self.rate, self.discount, self.tax_pct)
    }
}

#[derive(Debug, Clone, PartialEq, Args)]
pub struct ClientArgs {
    pub name: String,
    pub address: Option<String>,
    pub reference: Option<String>,
}

impl ClientArgs {
    pub fn into_update(self) -> ClientInfoUpdate {
        ClientInfoUpdate {
            name: Some(self.name),
            address: self.address,
            reference: self.reference,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Rates already include tax
    #[value(alias = "incl")]
    Inclusive,
    /// Tax is added on top of rates
    #[value(alias = "excl")]
    Exclusive,
}

impl ModeArg {
    pub fn tax_inclusive(self) -> bool {
        self == ModeArg::Inclusive
    }
}

/// Parses an `f64`, refusing NaN and infinity (they cannot be saved).
fn finite_number(value: &str) -> Result<f64, String> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if number.is_finite() {
        Ok(number)
    } else {
        Err(format!("'{}' is not a finite number", value))
    }
}

/// Parses a 1-based line number into a 0-based index.
fn line_index(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(line) if line >= 1 => Ok(line - 1),
        _ => Err(format!("line must be 1 or greater, got '{}'", value)),
    }
}
