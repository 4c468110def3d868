//! Domain availability resolution module

pub mod candidates;
pub mod heuristic;
pub mod oracle;
pub mod resolver;

// Re-export main functionality
pub use candidates::{CandidateGenerator, CandidateSet, ParsedQuery};
pub use heuristic::{FallbackHeuristic, RandomHeuristic};
pub use oracle::DohOracle;
pub use resolver::Resolver;

use async_trait::async_trait;

/// Trait for anything that can tell whether a domain is registered
#[async_trait]
pub trait AvailabilityOracle: Send + Sync {
    /// `true` when the domain looks unregistered. Implementations fail closed:
    /// if the answer cannot be determined they return `false`.
    async fn is_available(&self, domain: &str) -> bool;

    /// Get the oracle name
    fn name(&self) -> &'static str;
}
