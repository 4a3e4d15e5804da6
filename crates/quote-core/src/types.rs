//! # Domain Types
//!
//! Core domain types used throughout Quote Desk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Quote       │   │   QuoteItem     │   │   QuoteStatus   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  client_name    │   │  name           │   │  Draft          │       │
//! │  │  client_address │──►│  quantity       │   │  Sent           │       │
//! │  │  reference      │   │  rate           │   │  Accepted       │       │
//! │  │  items (1..n)   │   │  discount/unit  │   └─────────────────┘       │
//! │  │  tax_inclusive  │   │  tax_percent    │                              │
//! │  │  currency_code  │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │    TaxMode      │       │
//! │                                              │  Exclusive      │       │
//! │  ┌─────────────────┐   ┌─────────────────┐   │  Inclusive      │       │
//! │  │   LineTotals    │   │   QuoteTotals   │   └─────────────────┘       │
//! │  │  net/tax/total  │──►│  fold in order  │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Names
//! Serde names on `Quote` and `QuoteItem` ARE the persisted draft format
//! (`clientName`, `qty`, `discount`, `taxPct`, ...). Renaming a Rust field
//! is free; renaming a serde name breaks every saved draft.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::calc::compute_line_totals;
use crate::error::{CoreError, CoreResult};
use crate::DEFAULT_CURRENCY_CODE;

// =============================================================================
// Tax Mode
// =============================================================================

/// How entered rates relate to tax.
///
/// Persisted as the `taxInclusive` boolean on [`Quote`]; this enum is the
/// in-memory view used by the calculation module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Rate is pre-tax, tax is added on top.
    #[default]
    Exclusive,
    /// Rate already contains tax, net and tax are backed out of the gross.
    Inclusive,
}

impl TaxMode {
    /// Returns true for [`TaxMode::Inclusive`].
    #[inline]
    pub const fn is_inclusive(&self) -> bool {
        matches!(self, TaxMode::Inclusive)
    }
}

impl From<bool> for TaxMode {
    fn from(tax_inclusive: bool) -> Self {
        if tax_inclusive {
            TaxMode::Inclusive
        } else {
            TaxMode::Exclusive
        }
    }
}

// =============================================================================
// Quote Status
// =============================================================================

/// Workflow state of the live quote.
///
/// Independent of field values. `Accepted` is representable but no quote
/// operation transitions into it on its own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteStatus {
    /// There is an unsent, edited draft.
    #[default]
    Draft,
    /// The quote was sent to the client.
    Sent,
    /// The client accepted the quote.
    Accepted,
}

impl fmt::Display for QuoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteStatus::Draft => write!(f, "draft"),
            QuoteStatus::Sent => write!(f, "sent"),
            QuoteStatus::Accepted => write!(f, "accepted"),
        }
    }
}

// =============================================================================
// Quote Item
// =============================================================================

/// One priced line of a quote.
///
/// ## No Range Checks
/// Negative quantities, negative rates and odd tax percentages are accepted
/// as-is and flow straight into arithmetic. Only the exact inclusive-mode
/// `-100%` singularity is rejected, and only at calculation time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteItem {
    /// Display label, may be empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Units quoted. `Default` gives 0 (a fresh blank line); a decoded item
    /// with no `qty` gets 1.
    #[serde(rename = "qty", default = "default_qty", deserialize_with = "null_as_one")]
    pub quantity: f64,

    /// Unit price before discount.
    #[serde(default, deserialize_with = "null_as_default")]
    pub rate: f64,

    /// Subtracted from `rate` before multiplying by quantity.
    #[serde(rename = "discount", default, deserialize_with = "null_as_default")]
    pub discount_per_unit: f64,

    /// Percentage, `18.0` means 18%.
    #[serde(rename = "taxPct", default, deserialize_with = "null_as_default")]
    pub tax_percent: f64,
}

impl QuoteItem {
    /// Creates a fully specified line item.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        rate: f64,
        discount_per_unit: f64,
        tax_percent: f64,
    ) -> Self {
        QuoteItem {
            name: name.into(),
            quantity,
            rate,
            discount_per_unit,
            tax_percent,
        }
    }
}

// =============================================================================
// Client Info Update
// =============================================================================

/// Partial update of the client block.
///
/// `None` leaves the field untouched; `Some(String::new())` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfoUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub reference: Option<String>,
}

impl ClientInfoUpdate {
    /// Returns true when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none() && self.reference.is_none()
    }
}

// =============================================================================
// Quote
// =============================================================================

/// The quote aggregate root.
///
/// ## Invariants
/// - `items` is ordered: insertion order is display and accumulation order
/// - `Quote::default()` holds exactly one blank item; the session manager
///   keeps the list non-empty from then on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    #[serde(rename = "clientName", default, deserialize_with = "null_as_default")]
    pub client_name: String,

    #[serde(rename = "clientAddress", default, deserialize_with = "null_as_default")]
    pub client_address: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub reference: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<QuoteItem>,

    /// `false` = tax-exclusive, `true` = tax-inclusive.
    #[serde(rename = "taxInclusive", default, deserialize_with = "null_as_default")]
    pub tax_inclusive: bool,

    /// Three-letter code, used only for display.
    #[serde(
        rename = "currencyCode",
        default = "default_currency_code",
        deserialize_with = "null_as_default_currency"
    )]
    pub currency_code: String,
}

impl Default for Quote {
    fn default() -> Self {
        Quote {
            client_name: String::new(),
            client_address: String::new(),
            reference: String::new(),
            items: vec![QuoteItem::default()],
            tax_inclusive: false,
            currency_code: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }
}

impl Quote {
    /// Returns the tax mode implied by `tax_inclusive`.
    #[inline]
    pub fn tax_mode(&self) -> TaxMode {
        TaxMode::from(self.tax_inclusive)
    }

    /// Returns the number of line items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Applies a partial client-info update.
    pub fn apply_client_info(&mut self, update: ClientInfoUpdate) {
        if let Some(name) = update.name {
            self.client_name = name;
        }
        if let Some(address) = update.address {
            self.client_address = address;
        }
        if let Some(reference) = update.reference {
            self.reference = reference;
        }
    }

    /// Appends a blank line item and returns its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(QuoteItem::default());
        self.items.len() - 1
    }

    /// Removes the item at `index`, preserving the order of the rest.
    ///
    /// ## Returns
    /// - `Ok(false)` if only one item exists (silent no-op, checked first)
    /// - `Ok(true)` if the item was removed
    /// - `Err(ItemIndexOutOfRange)` if `index` is past the end
    pub fn remove_item(&mut self, index: usize) -> CoreResult<bool> {
        let len = self.items.len();
        if len <= 1 {
            return Ok(false);
        }
        if index >= len {
            return Err(CoreError::ItemIndexOutOfRange { index, len });
        }
        self.items.remove(index);
        Ok(true)
    }

    /// Replaces the item at `index` wholesale.
    pub fn update_item(&mut self, index: usize, item: QuoteItem) -> CoreResult<()> {
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => {
                *slot = item;
                Ok(())
            }
            None => Err(CoreError::ItemIndexOutOfRange { index, len }),
        }
    }

    /// Appends a blank item if the list is empty.
    ///
    /// Returns true if an item was added.
    pub fn ensure_has_item(&mut self) -> bool {
        if self.items.is_empty() {
            self.items.push(QuoteItem::default());
            true
        } else {
            false
        }
    }

    /// Calculates every line under the quote's current tax mode, in order.
    pub fn line_totals(&self) -> CoreResult<Vec<LineTotals>> {
        let mode = self.tax_mode();
        self.items
            .iter()
            .map(|item| compute_line_totals(item, mode))
            .collect()
    }

    /// Folds all line totals into quote aggregates.
    ///
    /// Always computed from the current items, never cached.
    pub fn totals(&self) -> CoreResult<QuoteTotals> {
        let mode = self.tax_mode();
        self.items
            .iter()
            .try_fold(QuoteTotals::default(), |mut acc, item| {
                let line = compute_line_totals(item, mode)?;
                acc.subtotal_net += line.net;
                acc.total_tax += line.tax;
                acc.grand_total += line.total;
                acc.item_count += 1;
                Ok(acc)
            })
            .and_then(QuoteTotals::checked)
    }
}

// =============================================================================
// Calculation Results
// =============================================================================

/// Net, tax and total for one line. Never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LineTotals {
    pub net: f64,
    pub tax: f64,
    pub total: f64,
}

/// Quote aggregates, summed over lines in item order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteTotals {
    pub subtotal_net: f64,
    pub total_tax: f64,
    pub grand_total: f64,
    pub item_count: usize,
}

impl QuoteTotals {
    /// Finite lines can still overflow when summed.
    fn checked(self) -> CoreResult<Self> {
        if !self.subtotal_net.is_finite() {
            return Err(CoreError::NonFiniteAmount {
                field: "subtotal_net",
            });
        }
        if !self.total_tax.is_finite() {
            return Err(CoreError::NonFiniteAmount { field: "total_tax" });
        }
        if !self.grand_total.is_finite() {
            return Err(CoreError::NonFiniteAmount {
                field: "grand_total",
            });
        }
        Ok(self)
    }
}

// =============================================================================
// Serde Defaults
// =============================================================================

fn default_qty() -> f64 {
    1.0
}

fn default_currency_code() -> String {
    DEFAULT_CURRENCY_CODE.to_string()
}

/// Treats an explicit JSON `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_one<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or_else(default_qty))
}

fn null_as_default_currency<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_currency_code))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn widget() -> QuoteItem {
        QuoteItem::new("Widget", 2.0, 100.0, 10.0, 18.0)
    }

    #[test]
    fn test_quote_default_has_one_blank_item() {
        let quote = Quote::default();
        assert_eq!(quote.item_count(), 1);
        assert_eq!(quote.items[0], QuoteItem::default());
        assert_eq!(quote.currency_code, "INR");
        assert_eq!(quote.tax_mode(), TaxMode::Exclusive);
    }

    #[test]
    fn test_quote_item_default_quantity_is_zero() {
        assert_eq!(QuoteItem::default().quantity, 0.0);
    }

    #[test]
    fn test_tax_mode_from_bool() {
        assert_eq!(TaxMode::from(true), TaxMode::Inclusive);
        assert_eq!(TaxMode::from(false), TaxMode::Exclusive);
        assert!(TaxMode::Inclusive.is_inclusive());
    }

    #[test]
    fn test_status_default_and_display() {
        assert_eq!(QuoteStatus::default(), QuoteStatus::Draft);
        assert_eq!(QuoteStatus::Accepted.to_string(), "accepted");
        assert_ne!(QuoteStatus::Sent, QuoteStatus::Accepted);
    }

    #[test]
    fn test_partial_client_info_update() {
        let mut quote = Quote::default();
        quote.apply_client_info(ClientInfoUpdate {
            name: Some("Acme".to_string()),
            address: Some("1 Road".to_string()),
            reference: Some("Q-1".to_string()),
        });

        quote.apply_client_info(ClientInfoUpdate {
            address: Some(String::new()),
            ..Default::default()
        });

        assert_eq!(quote.client_name, "Acme");
        assert_eq!(quote.client_address, "");
        assert_eq!(quote.reference, "Q-1");
    }

    #[test]
    fn test_remove_last_item_is_noop() {
        let mut quote = Quote::default();
        let before = quote.clone();

        assert_eq!(quote.remove_item(0), Ok(false));
        // The guard wins over the bounds check
        assert_eq!(quote.remove_item(7), Ok(false));
        assert_eq!(quote, before);
    }

    #[test]
    fn test_add_then_remove_restores_items() {
        let mut quote = Quote::default();
        quote.update_item(0, widget()).unwrap();
        let before = quote.items.clone();

        let index = quote.add_item();
        assert_eq!(index, 1);
        assert_eq!(quote.remove_item(index), Ok(true));
        assert_eq!(quote.items, before);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut quote = Quote::default();
        for name in ["a", "b", "c"] {
            let i = quote.add_item();
            quote.update_item(i, QuoteItem::new(name, 1.0, 1.0, 0.0, 0.0)).unwrap();
        }

        quote.remove_item(2).unwrap();
        let names: Vec<_> = quote.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["", "a", "c"]);
    }

    #[test]
    fn test_index_errors() {
        let mut quote = Quote::default();
        quote.add_item();

        assert_eq!(
            quote.remove_item(2),
            Err(CoreError::ItemIndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            quote.update_item(5, widget()),
            Err(CoreError::ItemIndexOutOfRange { index: 5, len: 2 })
        );
    }

    #[test]
    fn test_default_quote_totals_are_zero() {
        let totals = Quote::default().totals().unwrap();
        assert_eq!(totals.subtotal_net, 0.0);
        assert_eq!(totals.total_tax, 0.0);
        assert_eq!(totals.grand_total, 0.0);
        assert_eq!(totals.item_count, 1);
    }

    #[test]
    fn test_totals_sum_lines_in_order() {
        let mut quote = Quote::default();
        quote.update_item(0, widget()).unwrap();
        let i = quote.add_item();
        quote.update_item(i, QuoteItem::new("Bolt", 10.0, 5.0, 0.0, 0.0)).unwrap();

        let totals = quote.totals().unwrap();
        assert!((totals.subtotal_net - 230.0).abs() < 1e-9);
        assert!((totals.total_tax - 32.4).abs() < 1e-9);
        assert!((totals.grand_total - 262.4).abs() < 1e-9);
        assert_eq!(quote.line_totals().unwrap().len(), 2);
    }

    #[test]
    fn test_totals_change_with_tax_mode() {
        let mut quote = Quote::default();
        quote.update_item(0, widget()).unwrap();

        let exclusive = quote.totals().unwrap().grand_total;
        quote.tax_inclusive = true;
        let inclusive = quote.totals().unwrap().grand_total;

        assert!((exclusive - 212.4).abs() < 1e-9);
        assert!((inclusive - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_totals_surface_division_by_zero() {
        let mut quote = Quote::default();
        quote.tax_inclusive = true;
        quote
            .update_item(0, QuoteItem::new("Refund", 1.0, 50.0, 0.0, -100.0))
            .unwrap();

        assert!(matches!(
            quote.totals(),
            Err(CoreError::TaxBackOutDivisionByZero { .. })
        ));
    }

    #[test]
    fn test_totals_reject_overflowing_sum() {
        let mut quote = Quote::default();
        quote
            .update_item(0, QuoteItem::new("Big", 1.0, f64::MAX, 0.0, 0.0))
            .unwrap();
        let i = quote.add_item();
        quote
            .update_item(i, QuoteItem::new("Big", 1.0, f64::MAX, 0.0, 0.0))
            .unwrap();

        assert!(matches!(quote.totals(), Err(CoreError::NonFiniteAmount { .. })));
    }
}
