//! Domain Scout - domain availability lookup with alternative TLD suggestions
//!
//! Turns a typed domain name into the requested domain plus every alternative
//! TLD from a price catalog, each marked available or taken.

pub mod domain;
pub mod error;
pub mod presentation;
pub mod pricing;
pub mod types;

// Re-export commonly used types
pub use error::{DomainScoutError, Result};
pub use types::{
    Candidate, LookupMetrics, MetricsSnapshot, OracleConfig, ResolvedResult, ResolverConfig,
    Verdict, VerdictSource,
};

// Re-export main functionality
pub use domain::{AvailabilityOracle, CandidateGenerator, DohOracle, Resolver};
pub use presentation::ResultCard;
pub use pricing::PricingCatalog;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
