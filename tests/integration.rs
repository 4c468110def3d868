//! Integration tests for domain-scout

use domain_scout::{
    domain::{AvailabilityOracle, RandomHeuristic},
    DohOracle, DomainScoutError, OracleConfig, PricingCatalog, Resolver, ResolverConfig,
    ResultCard, Verdict, VerdictSource,
};
use httpmock::prelude::*;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn oracle_for(server: &MockServer) -> DohOracle {
    DohOracle::with_config(OracleConfig {
        endpoint: server.url("/resolve"),
        timeout: Duration::from_millis(500),
        retry_attempts: 0,
        retry_backoff: Duration::from_millis(10),
    })
}

async fn answer(server: &MockServer, domain: &str, status: u32) {
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/resolve")
                .query_param("name", domain)
                .query_param("type", "A");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "Status": status, "TC": false, "RD": true }));
        })
        .await;
}

#[tokio::test]
async fn test_nxdomain_is_available() {
    let server = MockServer::start_async().await;
    answer(&server, "free-name.com", 3).await;

    let oracle = oracle_for(&server);
    assert!(oracle.is_available("free-name.com").await);
    assert_eq!(oracle.get_metrics_snapshot().nxdomain, 1);
}

#[tokio::test]
async fn test_noerror_is_taken() {
    let server = MockServer::start_async().await;
    answer(&server, "google.com", 0).await;
    answer(&server, "servfail.com", 2).await;

    let oracle = oracle_for(&server);
    assert!(!oracle.is_available("google.com").await);
    assert!(!oracle.is_available("servfail.com").await);
}

#[tokio::test]
async fn test_http_error_fails_closed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/resolve");
            then.status(500);
        })
        .await;

    let oracle = oracle_for(&server);
    assert!(!oracle.is_available("broken.com").await);
    assert_eq!(oracle.get_metrics_snapshot().failures, 1);
}

#[tokio::test]
async fn test_malformed_body_fails_closed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/resolve");
            then.status(200).body("<html>not json</html>");
        })
        .await;

    let oracle = oracle_for(&server);
    assert!(!oracle.is_available("garbled.com").await);
    assert!(matches!(
        oracle.lookup("garbled.com").await,
        Err(DomainScoutError::Parse { .. })
    ));
}

#[tokio::test]
async fn test_slow_resolver_times_out_as_taken() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/resolve");
            then.status(200)
                .json_body(json!({ "Status": 3 }))
                .delay(Duration::from_secs(3));
        })
        .await;

    let oracle = oracle_for(&server);
    let started = std::time::Instant::now();
    assert!(!oracle.is_available("slow.com").await);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_retries_are_bounded() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/resolve");
            then.status(503);
        })
        .await;

    let oracle = DohOracle::with_config(OracleConfig {
        endpoint: server.url("/resolve"),
        timeout: Duration::from_millis(500),
        retry_attempts: 2,
        retry_backoff: Duration::from_millis(10),
    });

    assert!(!oracle.is_available("flaky.com").await);
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_search_against_mock_resolver() {
    let server = MockServer::start_async().await;
    answer(&server, "acme.com", 0).await;
    answer(&server, "acme.in", 3).await;
    answer(&server, "acme.co", 3).await;
    answer(&server, "acme.net", 0).await;

    let catalog = Arc::new(PricingCatalog::standard());
    let resolver = Resolver::new(
        catalog.clone(),
        Arc::new(oracle_for(&server)),
        ResolverConfig::default(),
    )
    .with_heuristic(Arc::new(RandomHeuristic::seeded(11, 0.7)));

    let results = resolver.resolve("ACME").await.unwrap();
    assert_eq!(results.len(), catalog.len());
    assert!(results[0].candidate.is_primary);
    assert_eq!(results.iter().filter(|r| r.candidate.is_primary).count(), 1);

    let tlds: HashSet<&str> = results.iter().map(|r| r.candidate.tld.as_str()).collect();
    assert_eq!(tlds.len(), results.len());

    let verdict_of = |domain: &str| {
        results
            .iter()
            .find(|r| r.domain() == domain)
            .map(|r| (r.verdict, r.source))
    };
    assert_eq!(verdict_of("acme.com"), Some((Verdict::Taken, VerdictSource::Dns)));
    assert_eq!(verdict_of("acme.in"), Some((Verdict::Available, VerdictSource::Dns)));
    assert_eq!(verdict_of("acme.co"), Some((Verdict::Available, VerdictSource::Dns)));
    assert_eq!(verdict_of("acme.net"), Some((Verdict::Taken, VerdictSource::Dns)));
    assert_eq!(
        results
            .iter()
            .filter(|r| r.source == VerdictSource::Heuristic)
            .count(),
        catalog.len() - 4
    );

    let primary = ResultCard::from_result(&results[0]);
    assert_eq!(primary.action_label, "Make Offer");
    assert_eq!(primary.price_label, None);
}

#[tokio::test]
async fn test_streamed_results_keep_order() {
    let server = MockServer::start_async().await;
    answer(&server, "shop.io", 3).await;

    let resolver = Resolver::new(
        Arc::new(PricingCatalog::standard()),
        Arc::new(oracle_for(&server)),
        ResolverConfig {
            parallel_alternatives: true,
            ..Default::default()
        },
    );

    let mut streamed = Vec::new();
    let results = resolver
        .resolve_with("shop.io", &CancellationToken::new(), |r| {
            streamed.push(r.candidate.sequence_index)
        })
        .await
        .unwrap();

    assert_eq!(results[0].domain(), "shop.io");
    assert_eq!(results[0].verdict, Verdict::Available);
    assert_eq!(streamed, (0..results.len()).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_empty_query_is_distinct_from_taken() {
    let resolver = Resolver::new(
        Arc::new(PricingCatalog::standard()),
        Arc::new(DohOracle::new()),
        ResolverConfig::default(),
    );

    let err = resolver.resolve("").await.unwrap_err();
    assert_eq!(err, DomainScoutError::EmptyQuery);
    assert!(!err.is_transport());
}

#[test]
fn test_reduced_catalog_falls_back_to_com() {
    let catalog = PricingCatalog::new(vec![(".com", "$10"), (".net", "$12"), (".org", "$9")]).unwrap();
    let resolver = Resolver::new(
        Arc::new(catalog),
        Arc::new(DohOracle::new()),
        ResolverConfig::default(),
    );

    let set = resolver.generator().generate("foo.io").unwrap();
    assert_eq!(set.candidates[0].domain, "foo.com");
    assert_eq!(resolver.real_check_tlds(&set.main_tld), vec![".in", ".co", ".net"]);
}

#[test]
fn test_library_initialization() {
    assert!(domain_scout::init().is_ok());
    assert!(!domain_scout::VERSION.is_empty());
}

#[test]
fn test_blocking_resolve_with_tokio_test() {
    let resolver = Resolver::new(
        Arc::new(PricingCatalog::standard()),
        Arc::new(DohOracle::new()),
        ResolverConfig::default(),
    );
    let err = tokio_test::block_on(resolver.resolve("   ")).unwrap_err();
    assert_eq!(err, DomainScoutError::EmptyQuery);
}
