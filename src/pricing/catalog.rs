//! Ordered TLD price catalog.

use std::collections::HashSet;

use crate::error::{DomainScoutError, Result};

/// Label returned for a TLD the catalog does not know
pub const UNKNOWN_PRICE_LABEL: &str = "Check Price";

/// Sentinel label for promotional free TLDs
pub const FREE_LABEL: &str = "FREE!!";

/// The TLD every unknown or missing request falls back to
pub const DEFAULT_TLD: &str = ".com";

const STANDARD_PRICES: &[(&str, &str)] = &[
    (".com", "₹1,179/Year"),
    (".in", "₹729/Year"),
    (".co.in", "₹639/Year"),
    (".org.in", "₹879/Year"),
    (".org", "₹1,299/Year"),
    (".shop", "₹2,859/Year"),
    (".store", "₹4,199/Year"),
    (".net", "₹1,569/Year"),
    (".co", "₹3,059/Year"),
    (".blog", "₹2,619/Year"),
    (".io", "₹5,939/Year"),
    (".online", "₹2,859/Year"),
    (".ai", "₹8,729/Year"),
    (".icu", "₹1,399/Year"),
    (".xyz", "₹1,229/Year"),
    (".pro", "₹2,529/Year"),
    (".ltd", "₹2,799/Year"),
    (".jp", "₹3,489/Year"),
    (".aozoradesu.com", FREE_LABEL),
];

/// One catalog row. `suffix` always starts with `.`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TldEntry {
    pub suffix: String,
    pub price_label: String,
}

/// Immutable, insertion-ordered TLD price list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingCatalog {
    entries: Vec<TldEntry>,
}

impl PricingCatalog {
    /// Build a catalog from `(suffix, price)` pairs, keeping their order.
    ///
    /// Suffixes are lower-cased. A suffix without a leading dot or a repeated
    /// suffix is rejected, so no two candidates of one search can share a TLD.
    pub fn new<I, S, P>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut rows = Vec::new();

        for (suffix, price) in entries {
            let suffix = suffix.into().trim().to_lowercase();
            if suffix.len() < 2 || !suffix.starts_with('.') {
                return Err(DomainScoutError::config(format!(
                    "TLD '{}' must start with '.'",
                    suffix
                )));
            }
            if !seen.insert(suffix.clone()) {
                return Err(DomainScoutError::config(format!(
                    "TLD '{}' listed twice",
                    suffix
                )));
            }
            rows.push(TldEntry {
                suffix,
                price_label: price.into(),
            });
        }

        Ok(Self { entries: rows })
    }

    /// The built-in catalog
    pub fn standard() -> Self {
        Self {
            entries: STANDARD_PRICES
                .iter()
                .map(|(suffix, price)| TldEntry {
                    suffix: suffix.to_string(),
                    price_label: price.to_string(),
                })
                .collect(),
        }
    }

    /// Price label for `tld`, or [`UNKNOWN_PRICE_LABEL`]
    pub fn price_for(&self, tld: &str) -> &str {
        self.get(tld)
            .map(|entry| entry.price_label.as_str())
            .unwrap_or(UNKNOWN_PRICE_LABEL)
    }

    pub fn get(&self, tld: &str) -> Option<&TldEntry> {
        self.entries.iter().find(|entry| entry.suffix == tld)
    }

    pub fn contains(&self, tld: &str) -> bool {
        self.get(tld).is_some()
    }

    pub fn is_free(&self, tld: &str) -> bool {
        self.price_for(tld) == FREE_LABEL
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &TldEntry> {
        self.entries.iter()
    }

    pub fn tlds(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.suffix.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for PricingCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_order() {
        let catalog = PricingCatalog::standard();
        assert_eq!(catalog.len(), 19);
        let tlds: Vec<&str> = catalog.tlds().take(4).collect();
        assert_eq!(tlds, vec![".com", ".in", ".co.in", ".org.in"]);
        assert_eq!(catalog.tlds().last(), Some(".aozoradesu.com"));
    }

    #[test]
    fn test_price_lookup() {
        let catalog = PricingCatalog::standard();
        assert_eq!(catalog.price_for(".com"), "₹1,179/Year");
        assert_eq!(catalog.price_for(".io"), "₹5,939/Year");
        assert_eq!(catalog.price_for(".dev"), UNKNOWN_PRICE_LABEL);
        assert!(catalog.is_free(".aozoradesu.com"));
        assert!(!catalog.is_free(".com"));
    }

    #[test]
    fn test_custom_catalog() {
        let catalog = PricingCatalog::new(vec![(".COM", "$10"), (".net", "$12")]).unwrap();
        assert!(catalog.contains(".com"));
        assert_eq!(catalog.price_for(".net"), "$12");
    }

    #[test]
    fn test_rejects_bad_suffixes() {
        assert!(PricingCatalog::new(vec![("com", "$10")]).is_err());
        assert!(PricingCatalog::new(vec![(".", "$10")]).is_err());
        assert!(PricingCatalog::new(vec![(".com", "$10"), (".com", "$11")]).is_err());
    }
}
