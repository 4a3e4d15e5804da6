//! # Calculation Module
//!
//! Pure per-line arithmetic. No state, no rounding.
//!
//! ## The Two Tax Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  base = (rate - discount_per_unit) × quantity                          │
//! │                                                                         │
//! │  EXCLUSIVE (tax added on top)        INCLUSIVE (tax embedded)          │
//! │  ─────────────────────────────       ─────────────────────────────     │
//! │  net   = base                        net   = base / (1 + pct/100)      │
//! │  tax   = base × (pct/100)            tax   = base - net                │
//! │  total = net + tax                   total = base                      │
//! │                                                                         │
//! │  Widget: qty 2, rate 100, discount 10, 18%                             │
//! │    exclusive → net 180.00  tax 32.40  total 212.40                     │
//! │    inclusive → net 152.54  tax 27.46  total 180.00                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding
//! None here. Values are full `f64`; rounding to currency precision is a
//! display concern handled by [`crate::money::format_currency`].

use crate::error::{CoreError, CoreResult};
use crate::types::{LineTotals, QuoteItem, TaxMode};

/// Unit price after the per-unit discount. May go negative.
#[inline]
pub fn effective_rate(item: &QuoteItem) -> f64 {
    item.rate - item.discount_per_unit
}

/// Discounted line amount before any tax split.
#[inline]
pub fn line_base(item: &QuoteItem) -> f64 {
    effective_rate(item) * item.quantity
}

/// Computes net, tax and total for one line item.
///
/// ## Errors
/// - [`CoreError::TaxBackOutDivisionByZero`] in inclusive mode when
///   `1 + tax_percent / 100` is zero (`tax_percent == -100`)
/// - [`CoreError::NonFiniteAmount`] if any step yields NaN or infinity
///   (NaN inputs, or magnitudes that overflow `f64`)
///
/// ## Example
/// ```rust
/// use quote_core::calc::compute_line_totals;
/// use quote_core::{QuoteItem, TaxMode};
///
/// let item = QuoteItem::new("Widget", 2.0, 100.0, 10.0, 18.0);
/// let line = compute_line_totals(&item, TaxMode::Exclusive).unwrap();
/// assert!((line.total - 212.4).abs() < 1e-9);
/// ```
pub fn compute_line_totals(item: &QuoteItem, mode: TaxMode) -> CoreResult<LineTotals> {
    let base = line_base(item);

    let line = match mode {
        TaxMode::Exclusive => {
            let tax = base * (item.tax_percent / 100.0);
            LineTotals {
                net: base,
                tax,
                total: base + tax,
            }
        }
        TaxMode::Inclusive => {
            let divisor = 1.0 + item.tax_percent / 100.0;
            if divisor == 0.0 {
                return Err(CoreError::TaxBackOutDivisionByZero {
                    tax_percent: item.tax_percent,
                });
            }
            let net = base / divisor;
            LineTotals {
                net,
                tax: base - net,
                total: base,
            }
        }
    };

    ensure_finite(line)
}

fn ensure_finite(line: LineTotals) -> CoreResult<LineTotals> {
    if !line.net.is_finite() {
        return Err(CoreError::NonFiniteAmount { field: "net" });
    }
    if !line.tax.is_finite() {
        return Err(CoreError::NonFiniteAmount { field: "tax" });
    }
    if !line.total.is_finite() {
        return Err(CoreError::NonFiniteAmount { field: "total" });
    }
    Ok(line)
}

// =============================================================================
// Unit Tests
// =============================================================================
