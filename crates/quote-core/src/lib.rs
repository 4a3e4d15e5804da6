//! # quote-core: Pure Quote Logic for Quote Desk
//!
//! This crate is the **heart** of Quote Desk. It holds the quote data model
//! and the calculation engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Quote Desk Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Presentation (forms, print preview) - external       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ mutations / reads                      │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            quote-session (QuoteManager, observers)              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   calc    │  │   codec   │  │   money   │  │   │
//! │  │   │  Quote    │  │ LineTotals│  │ encode    │  │ format_   │  │   │
//! │  │   │ QuoteItem │  │ tax modes │  │ decode    │  │ currency  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO LOGGING SINKS • PURE FUNCTIONS  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Quote, QuoteItem, QuoteStatus, TaxMode)
//! - [`calc`] - Per-line net/tax/total under both tax modes
//! - [`codec`] - Draft blob encode/decode with default filling
//! - [`money`] - Currency display strings
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output
//! 2. **No I/O**: persistence lives in quote-store
//! 3. **Full-Precision Amounts**: `f64` throughout, rounded only for display
//! 4. **Explicit Errors**: arithmetic singularities are typed errors, never NaN
//!
//! ## Example Usage
//!
//! ```rust
//! use quote_core::{format_currency, Quote, QuoteItem};
//!
//! let mut quote = Quote::default();
//! quote.update_item(0, QuoteItem::new("Widget", 2.0, 100.0, 10.0, 18.0)).unwrap();
//!
//! let totals = quote.totals().unwrap();
//! assert_eq!(format_currency(totals.grand_total, &quote.currency_code), "₹212.40");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calc;
pub mod codec;
pub mod error;
pub mod money;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calc::compute_line_totals;
pub use codec::{decode, encode};
pub use error::{CoreError, CoreResult, DecodeError};
pub use money::format_currency;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when a quote or draft does not name one.
pub const DEFAULT_CURRENCY_CODE: &str = "INR";
