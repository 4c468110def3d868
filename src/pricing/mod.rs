//! TLD pricing shared across modules.
//!
//! Keeps price knowledge in one immutable catalog that is built once and
//! handed to the generator and the resolver.

pub mod catalog;

pub use catalog::{PricingCatalog, TldEntry, DEFAULT_TLD, FREE_LABEL, UNKNOWN_PRICE_LABEL};
