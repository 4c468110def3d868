//! DNS-over-HTTPS availability oracle

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;

use super::AvailabilityOracle;
use crate::error::{DomainScoutError, Result};
use crate::types::{LookupMetrics, MetricsSnapshot, OracleConfig, MAX_RETRY_ATTEMPTS};

/// DNS response code for a name that does not exist
const NXDOMAIN: u32 = 3;

/// Oracle backed by a JSON DNS-over-HTTPS resolver (`?name=<domain>&type=A`)
pub struct DohOracle {
    client: Client,
    config: OracleConfig,
    metrics: Arc<LookupMetrics>,
}

impl DohOracle {
    /// Create an oracle with default configuration
    pub fn new() -> Self {
        Self::with_config(OracleConfig::default())
    }

    /// Create an oracle with custom configuration
    pub fn with_config(config: OracleConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("domain-scout/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self {
            client,
            config,
            metrics: Arc::new(LookupMetrics::new()),
        }
    }

    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    pub fn get_metrics(&self) -> Arc<LookupMetrics> {
        Arc::clone(&self.metrics)
    }

    pub fn get_metrics_snapshot(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// One lookup, bounded by the configured timeout. Errors are returned as-is.
    pub async fn lookup(&self, domain: &str) -> Result<bool> {
        let status = timeout(self.config.timeout, self.fetch_status(domain))
            .await
            .map_err(|_| self.timeout_error())??;

        Ok(status == NXDOMAIN)
    }

    fn timeout_error(&self) -> DomainScoutError {
        let timeout_ms = u64::try_from(self.config.timeout.as_millis()).unwrap_or(u64::MAX);
        DomainScoutError::timeout("DNS lookup", timeout_ms)
    }

    fn request_error(&self, err: reqwest::Error) -> DomainScoutError {
        if err.is_timeout() {
            self.timeout_error()
        } else {
            err.into()
        }
    }

    async fn fetch_status(&self, domain: &str) -> Result<u32> {
        let url = &self.config.endpoint;
        let response = self
            .client
            .get(url)
            .query(&[("name", domain), ("type", "A")])
            .send()
            .await
            .map_err(|e| self.request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainScoutError::network(
                format!("Resolver answered with status {}", status),
                Some(status.as_u16()),
                Some(url.clone()),
            ));
        }

        let text = response.text().await.map_err(|e| self.request_error(e))?;
        let body: DohResponse = serde_json::from_str(&text)
            .map_err(|e| DomainScoutError::parse(e.to_string(), Some(text)))?;

        Ok(body.status)
    }
}

impl Default for DohOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AvailabilityOracle for DohOracle {
    async fn is_available(&self, domain: &str) -> bool {
        let attempts = self
            .config
            .retry_attempts
            .min(MAX_RETRY_ATTEMPTS)
            .saturating_add(1);
        let mut last_error = None;

        for attempt in 1..=attempts {
            let start_time = Instant::now();
            match self.lookup(domain).await {
                Ok(available) => {
                    let duration = start_time.elapsed();
                    self.metrics.record_lookup(duration, available);
                    tracing::debug!(
                        domain = %domain,
                        available = %available,
                        attempt = %attempt,
                        duration_ms = %duration.as_millis(),
                        "DNS lookup completed"
                    );
                    return available;
                }
                Err(e) => {
                    tracing::debug!(domain = %domain, attempt = %attempt, error = %e, "DNS lookup failed");
                    if attempt < attempts {
                        let step = u32::try_from(attempt).unwrap_or(u32::MAX);
                        tokio::time::sleep(self.config.retry_backoff.saturating_mul(step)).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        // OracleUnreachable is absorbed here: callers only ever see `false`.
        let message = last_error.map(|e| e.to_string()).unwrap_or_default();
        let e = DomainScoutError::oracle_unreachable(domain, message);
        self.metrics.record_failure();
        tracing::warn!(domain = %domain, attempts = %attempts, error = %e, "Reporting domain as taken");
        false
    }

    fn name(&self) -> &'static str {
        "doh"
    }
}

/// DNS JSON API response; only the status code matters here
#[derive(Debug, Deserialize)]
struct DohResponse {
    #[serde(rename = "Status")]
    status: u32,
}
