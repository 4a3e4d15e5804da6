//! # Quote Desk - Entry Point
//!
//! ## Usage
//! ```bash
//! quote-desk                                  # show the current draft
//! quote-desk add Widget 2 100 10 18           # add a line and save
//! quote-desk mode inclusive
//! quote-desk --config ./quotedesk.toml send
//! ```

use std::process::ExitCode;

use clap::Parser;
use quote_desk::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match quote_desk::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
