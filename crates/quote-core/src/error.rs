//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                         │
//! │  ├── CoreError        - Arithmetic, index and codec failures           │
//! │  └── DecodeError      - Malformed draft blobs                          │
//! │                                                                         │
//! │  quote-store errors (separate crate)                                   │
//! │  └── StoreError       - Draft slot I/O failures                        │
//! │                                                                         │
//! │  Recovery: DecodeError and StoreError are swallowed by the session     │
//! │  manager during load/save. Arithmetic and index errors reach callers.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core quote logic errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Tax-inclusive back-out hit the `tax_percent == -100` singularity.
    ///
    /// ## When This Occurs
    /// ```text
    /// base = 180.00, tax_percent = -100
    ///      │
    ///      ▼
    /// net = base / (1 + (-100 / 100)) = base / 0
    ///      │
    ///      ▼
    /// TaxBackOutDivisionByZero { tax_percent: -100.0 }
    /// ```
    #[error("Cannot back tax out of an inclusive amount at {tax_percent}% (division by zero)")]
    TaxBackOutDivisionByZero { tax_percent: f64 },

    /// An arithmetic step produced NaN or infinity.
    ///
    /// Raised instead of letting a non-finite value leak into quote totals.
    #[error("Calculation of {field} produced a non-finite amount")]
    NonFiniteAmount { field: &'static str },

    /// A line item index is outside the current item list.
    #[error("Item index {index} is out of range for {len} items")]
    ItemIndexOutOfRange { index: usize, len: usize },

    /// The quote could not be serialized.
    #[error("Failed to encode quote: {0}")]
    Encode(String),

    /// A draft blob could not be decoded.
    #[error("Failed to decode quote: {0}")]
    Decode(#[from] DecodeError),
}

// =============================================================================
// Decode Error
// =============================================================================

/// Structural problems found while decoding a draft blob.
///
/// Missing or null fields are never errors, they take their defaults.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Text is not valid JSON.
    #[error("draft is not valid JSON: {0}")]
    Malformed(String),

    /// Top-level JSON value is not an object.
    #[error("draft must be a JSON object")]
    NotAnObject,

    /// `items` holds something other than an array.
    #[error("draft field 'items' must be a sequence")]
    ItemsNotASequence,

    /// A field holds a value of the wrong JSON type.
    #[error("draft field '{field}' has an invalid value")]
    InvalidField { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
