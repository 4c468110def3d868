//! Candidate domains derived from a search query

use std::sync::Arc;

use crate::error::{DomainScoutError, Result};
use crate::pricing::{PricingCatalog, DEFAULT_TLD};
use crate::types::Candidate;

/// A query split into its leftmost label and the dotted remainder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub base_name: String,
    pub requested_tld: Option<String>,
}

impl ParsedQuery {
    /// Parse a raw query. Case and surrounding whitespace are folded here too.
    pub fn parse(query: &str) -> Result<Self> {
        let query = query.trim().to_lowercase();
        let mut parts = query.split('.');

        let base_name = parts.next().unwrap_or_default().to_string();
        if base_name.is_empty() {
            return Err(DomainScoutError::EmptyQuery);
        }

        let rest: Vec<&str> = parts.collect();
        let requested_tld = if rest.is_empty() {
            None
        } else {
            Some(format!(".{}", rest.join(".")))
        };

        Ok(Self {
            base_name,
            requested_tld,
        })
    }
}

/// The candidates of one search, primary first
#[derive(Debug, Clone)]
pub struct CandidateSet {
    pub base_name: String,
    pub main_tld: String,
    pub candidates: Vec<Candidate>,
}

impl CandidateSet {
    pub fn primary(&self) -> Option<&Candidate> {
        self.candidates.first().filter(|c| c.is_primary)
    }

    pub fn alternatives(&self) -> &[Candidate] {
        self.candidates.get(1..).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Builds the primary domain and its alternative-TLD variants
#[derive(Debug, Clone)]
pub struct CandidateGenerator {
    catalog: Arc<PricingCatalog>,
}

impl CandidateGenerator {
    pub fn new(catalog: Arc<PricingCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PricingCatalog {
        &self.catalog
    }

    /// Resolve the TLD the primary candidate uses. Anything outside the
    /// catalog, or no TLD at all, means `.com`.
    pub fn main_tld(&self, parsed: &ParsedQuery) -> String {
        match &parsed.requested_tld {
            Some(tld) if self.catalog.contains(tld) => tld.clone(),
            _ => DEFAULT_TLD.to_string(),
        }
    }

    pub fn generate(&self, query: &str) -> Result<CandidateSet> {
        let parsed = ParsedQuery::parse(query)?;
        let main_tld = self.main_tld(&parsed);

        let mut candidates = Vec::with_capacity(self.catalog.len().max(1));
        candidates.push(Candidate {
            domain: format!("{}{}", parsed.base_name, main_tld),
            tld: main_tld.clone(),
            price_label: self.catalog.price_for(&main_tld).to_string(),
            is_primary: true,
            sequence_index: 0,
        });

        for entry in self.catalog.iter().filter(|e| e.suffix != main_tld) {
            candidates.push(Candidate {
                domain: format!("{}{}", parsed.base_name, entry.suffix),
                tld: entry.suffix.clone(),
                price_label: entry.price_label.clone(),
                is_primary: false,
                sequence_index: candidates.len(),
            });
        }

        tracing::debug!(
            query = %query,
            main_tld = %main_tld,
            candidates = %candidates.len(),
            "Generated candidates"
        );

        Ok(CandidateSet {
            base_name: parsed.base_name,
            main_tld,
            candidates,
        })
    }
}
