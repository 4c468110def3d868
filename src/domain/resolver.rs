//! Search orchestration: candidates in, ordered verdicts out

use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use super::candidates::{CandidateGenerator, CandidateSet};
use super::heuristic::{FallbackHeuristic, RandomHeuristic};
use super::AvailabilityOracle;
use crate::error::{DomainScoutError, Result};
use crate::pricing::PricingCatalog;
use crate::types::{Candidate, ResolvedResult, ResolverConfig, Verdict, VerdictSource};

/// Resolves a query into the primary domain plus every alternative TLD.
///
/// The primary candidate is always looked up for real. Alternatives in the
/// real-check subset are looked up too; the rest get a heuristic verdict.
/// Results come out in candidate order regardless of how lookups are scheduled.
pub struct Resolver {
    generator: CandidateGenerator,
    oracle: Arc<dyn AvailabilityOracle>,
    heuristic: Arc<dyn FallbackHeuristic>,
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(
        catalog: Arc<PricingCatalog>,
        oracle: Arc<dyn AvailabilityOracle>,
        config: ResolverConfig,
    ) -> Self {
        let heuristic = Arc::new(RandomHeuristic::new(config.heuristic_available_rate));
        Self {
            generator: CandidateGenerator::new(catalog),
            oracle,
            heuristic,
            config,
        }
    }

    /// Replace the random source used for non-real-checked alternatives
    pub fn with_heuristic(mut self, heuristic: Arc<dyn FallbackHeuristic>) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn generator(&self) -> &CandidateGenerator {
        &self.generator
    }

    /// Alternatives that get a real lookup when the primary uses `main_tld`
    pub fn real_check_tlds(&self, main_tld: &str) -> Vec<String> {
        self.config
            .real_check_priority
            .iter()
            .filter(|tld| tld.as_str() != main_tld)
            .take(self.config.real_check_limit)
            .cloned()
            .collect()
    }

    /// Resolve a query to completion
    pub async fn resolve(&self, query: &str) -> Result<Vec<ResolvedResult>> {
        self.resolve_with(query, &CancellationToken::new(), |_| {})
            .await
    }

    /// Resolve a query, handing each result to `on_result` as soon as it is
    /// final. Cancelling `cancel` stops the search with
    /// [`DomainScoutError::Cancelled`]; nothing is emitted after that.
    pub async fn resolve_with<F>(
        &self,
        query: &str,
        cancel: &CancellationToken,
        on_result: F,
    ) -> Result<Vec<ResolvedResult>>
    where
        F: FnMut(&ResolvedResult) + Send,
    {
        let set = self.generator.generate(query)?;
        self.resolve_set(&set, cancel, on_result).await
    }

    /// Resolve an already generated candidate set. The set is checked for
    /// structural consistency before any lookup; a malformed set yields
    /// [`DomainScoutError::UnexpectedFailure`] and emits nothing.
    pub async fn resolve_set<F>(
        &self,
        set: &CandidateSet,
        cancel: &CancellationToken,
        mut on_result: F,
    ) -> Result<Vec<ResolvedResult>>
    where
        F: FnMut(&ResolvedResult) + Send,
    {
        let search_start = Instant::now();
        validate_set(set)?;
        check_cancelled(cancel)?;

        let primary = set
            .primary()
            .cloned()
            .ok_or_else(|| DomainScoutError::unexpected("candidate set has no primary domain"))?;

        let mut results = Vec::with_capacity(set.len());

        let available = self.lookup(&primary, cancel).await?;
        emit(
            &mut results,
            &mut on_result,
            ResolvedResult::new(primary, Verdict::from(available), VerdictSource::Dns),
        );

        let real_tlds = self.real_check_tlds(&set.main_tld);
        let prefetched = if self.config.parallel_alternatives {
            self.prefetch(set, &real_tlds, cancel).await?
        } else {
            HashMap::new()
        };

        for candidate in set.alternatives() {
            check_cancelled(cancel)?;

            let (verdict, source) = if real_tlds.contains(&candidate.tld) {
                let available = match prefetched.get(&candidate.sequence_index) {
                    Some(available) => *available,
                    None => self.lookup(candidate, cancel).await?,
                };
                (Verdict::from(available), VerdictSource::Dns)
            } else {
                (self.heuristic.draw(), VerdictSource::Heuristic)
            };

            emit(
                &mut results,
                &mut on_result,
                ResolvedResult::new(candidate.clone(), verdict, source),
            );
        }

        tracing::info!(
            base_name = %set.base_name,
            main_tld = %set.main_tld,
            results = %results.len(),
            real_checked = %(real_tlds.len() + 1),
            available = %results.iter().filter(|r| r.is_available()).count(),
            duration_ms = %search_start.elapsed().as_millis(),
            "Search completed"
        );

        Ok(results)
    }

    /// Oracle call raced against cancellation
    async fn lookup(&self, candidate: &Candidate, cancel: &CancellationToken) -> Result<bool> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DomainScoutError::Cancelled),
            available = self.oracle.is_available(&candidate.domain) => Ok(available),
        }
    }

    /// Look up every real-checked alternative concurrently, keyed by sequence index
    async fn prefetch(
        &self,
        set: &CandidateSet,
        real_tlds: &[String],
        cancel: &CancellationToken,
    ) -> Result<HashMap<usize, bool>> {
        let lookups = set
            .alternatives()
            .iter()
            .filter(|candidate| real_tlds.contains(&candidate.tld))
            .map(|candidate| async move {
                let available = self.oracle.is_available(&candidate.domain).await;
                (candidate.sequence_index, available)
            });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(DomainScoutError::Cancelled),
            verdicts = join_all(lookups) => Ok(verdicts.into_iter().collect()),
        }
    }
}

fn emit<F>(results: &mut Vec<ResolvedResult>, on_result: &mut F, result: ResolvedResult)
where
    F: FnMut(&ResolvedResult),
{
    tracing::debug!(
        domain = %result.domain(),
        verdict = %result.verdict,
        source = %result.source,
        index = %result.candidate.sequence_index,
        "Candidate resolved"
    );
    on_result(&result);
    results.push(result);
}

fn check_cancelled(cancel: &CancellationToken) -> Result<()> {
    if cancel.is_cancelled() {
        return Err(DomainScoutError::Cancelled);
    }
    Ok(())
}

fn validate_set(set: &CandidateSet) -> Result<()> {
    if set.primary().is_none() {
        return Err(DomainScoutError::unexpected("candidate set has no primary domain"));
    }

    let mut tlds = HashSet::with_capacity(set.len());
    for (expected_index, candidate) in set.candidates.iter().enumerate() {
        let misplaced_primary = candidate.is_primary != (expected_index == 0);
        if misplaced_primary
            || candidate.sequence_index != expected_index
            || !tlds.insert(candidate.tld.as_str())
        {
            return Err(DomainScoutError::unexpected(format!(
                "malformed candidate '{}' at position {}",
                candidate.domain, expected_index
            )));
        }
    }
    Ok(())
}
