//! Core types and structures for domain-scout

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::error::{DomainScoutError, Result};

/// Default DNS-over-HTTPS JSON endpoint
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";

/// Upper bound on extra lookup attempts after a failure
pub const MAX_RETRY_ATTEMPTS: usize = 5;

/// Alternatives eligible for a real lookup, in priority order
pub const REAL_CHECK_PRIORITY: &[&str] = &[".in", ".co", ".net", ".org", ".io"];

/// Domain availability verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Available,
    Taken,
}

impl Verdict {
    pub fn is_available(&self) -> bool {
        matches!(self, Verdict::Available)
    }
}

impl From<bool> for Verdict {
    fn from(available: bool) -> Self {
        if available {
            Verdict::Available
        } else {
            Verdict::Taken
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Available => write!(f, "available"),
            Verdict::Taken => write!(f, "taken"),
        }
    }
}

/// Where a verdict came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerdictSource {
    Dns,
    Heuristic,
}

impl std::fmt::Display for VerdictSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerdictSource::Dns => write!(f, "dns"),
            VerdictSource::Heuristic => write!(f, "heuristic"),
        }
    }
}

/// A domain derived from one search query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub domain: String,
    pub tld: String,
    pub price_label: String,
    pub is_primary: bool,
    pub sequence_index: usize,
}

/// A candidate with its availability verdict attached
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedResult {
    pub candidate: Candidate,
    pub verdict: Verdict,
    pub source: VerdictSource,
    pub checked_at: DateTime<Utc>,
}

impl ResolvedResult {
    pub fn new(candidate: Candidate, verdict: Verdict, source: VerdictSource) -> Self {
        Self {
            candidate,
            verdict,
            source,
            checked_at: Utc::now(),
        }
    }

    pub fn domain(&self) -> &str {
        &self.candidate.domain
    }

    pub fn is_available(&self) -> bool {
        self.verdict.is_available()
    }
}

/// Configuration for the DNS-over-HTTPS oracle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    pub endpoint: String,
    pub timeout: Duration,
    /// Extra attempts after the first failed lookup, capped at [`MAX_RETRY_ATTEMPTS`]
    pub retry_attempts: usize,
    pub retry_backoff: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            timeout: Duration::from_secs(5),
            retry_attempts: 0,
            retry_backoff: Duration::from_millis(250),
        }
    }
}

impl OracleConfig {
    /// Defaults overridden by `DOMAIN_SCOUT_DOH_URL`, `DOMAIN_SCOUT_TIMEOUT_SECS`
    /// and `DOMAIN_SCOUT_RETRIES`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(endpoint) = env::var("DOMAIN_SCOUT_DOH_URL") {
            if endpoint.trim().is_empty() {
                return Err(DomainScoutError::config("DOMAIN_SCOUT_DOH_URL is empty"));
            }
            config.endpoint = endpoint.trim().to_string();
        }
        if let Some(secs) = parse_env::<u64>("DOMAIN_SCOUT_TIMEOUT_SECS")? {
            if secs == 0 {
                return Err(DomainScoutError::config("DOMAIN_SCOUT_TIMEOUT_SECS must be positive"));
            }
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(retries) = parse_env::<usize>("DOMAIN_SCOUT_RETRIES")? {
            if retries > MAX_RETRY_ATTEMPTS {
                return Err(DomainScoutError::config(format!(
                    "DOMAIN_SCOUT_RETRIES must be at most {}",
                    MAX_RETRY_ATTEMPTS
                )));
            }
            config.retry_attempts = retries;
        }

        Ok(config)
    }
}

/// Configuration for the resolution orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// TLDs whose alternatives get a real lookup, highest priority first
    pub real_check_priority: Vec<String>,
    pub real_check_limit: usize,
    /// Chance the fallback heuristic reports an alternative as available
    pub heuristic_available_rate: f64,
    /// Look up real-checked alternatives concurrently
    pub parallel_alternatives: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            real_check_priority: REAL_CHECK_PRIORITY.iter().map(|s| s.to_string()).collect(),
            real_check_limit: 3,
            heuristic_available_rate: 0.7,
            parallel_alternatives: false,
        }
    }
}

impl ResolverConfig {
    /// Defaults overridden by `DOMAIN_SCOUT_PARALLEL`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(parallel) = parse_env::<bool>("DOMAIN_SCOUT_PARALLEL")? {
            config.parallel_alternatives = parallel;
        }
        Ok(config)
    }
}

fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| DomainScoutError::config(format!("Invalid value for {}: '{}'", key, raw))),
        Err(_) => Ok(None),
    }
}

/// Lookup counters shared by every search that goes through one oracle
#[derive(Debug, Default)]
pub struct LookupMetrics {
    lookups: AtomicU64,
    nxdomain: AtomicU64,
    failures: AtomicU64,
    total_lookup_ms: AtomicU64,
}

impl LookupMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_lookup(&self, elapsed: Duration, available: bool) {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        self.total_lookup_ms
            .fetch_add(elapsed.as_millis() as u64, Ordering::Relaxed);
        if available {
            self.nxdomain.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lookups: self.lookups.load(Ordering::Relaxed),
            nxdomain: self.nxdomain.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            total_lookup_ms: self.total_lookup_ms.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time copy of [`LookupMetrics`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub lookups: u64,
    pub nxdomain: u64,
    pub failures: u64,
    pub total_lookup_ms: u64,
}

impl MetricsSnapshot {
    pub fn avg_lookup_ms(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.total_lookup_ms as f64 / self.lookups as f64
        }
    }
}
