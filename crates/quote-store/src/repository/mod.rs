//! # Repository Module
//!
//! SQL-backed implementations of the store contracts.
//!
//! ## Available Repositories
//!
//! - [`SqliteDraftStore`] - The draft slot as a single `draft_slot` row

pub mod draft_slot;

pub use draft_slot::SqliteDraftStore;
