//! Domain Scout - check a domain name and its alternative TLDs
//!
//! Looks up the requested domain over DNS-over-HTTPS and lists every
//! alternative TLD from the price catalog with availability and pricing.

use anyhow::Context;
use domain_scout::{
    presentation::ResultCard, DohOracle, DomainScoutError, OracleConfig, PricingCatalog,
    Resolver, ResolverConfig,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the library
    domain_scout::init().context("failed to initialize")?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && (args[1] == "--help" || args[1] == "-h") {
        print_help();
        return Ok(());
    }

    let query = args.get(1..).map(|rest| rest.join(" ")).unwrap_or_default();

    let code = match run_search(&query).await {
        Ok(()) => 0,
        Err(DomainScoutError::EmptyQuery) => {
            eprintln!("🔎 {}", DomainScoutError::EmptyQuery.user_message());
            eprintln!("💡 Usage: domain-scout <domain>");
            2
        }
        Err(DomainScoutError::Cancelled) => {
            eprintln!("⏹️  {}", DomainScoutError::Cancelled.user_message());
            130
        }
        Err(e) => {
            tracing::error!(error = %e, "Search failed");
            eprintln!("❌ {}", e.user_message());
            1
        }
    };

    if code != 0 {
        process::exit(code);
    }
    Ok(())
}

/// Resolve one query and print a card per result as it arrives
async fn run_search(query: &str) -> domain_scout::Result<()> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Err(DomainScoutError::EmptyQuery);
    }

    let oracle = Arc::new(DohOracle::with_config(OracleConfig::from_env()?));
    let resolver = Resolver::new(
        Arc::new(PricingCatalog::standard()),
        oracle.clone(),
        ResolverConfig::from_env()?,
    );

    // Ctrl-C supersedes the running search
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    println!("🔍 Domain Scout - searching \"{}\"", query);
    println!("═══════════════════════════════════");

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Checking...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let check_start = std::time::Instant::now();
    let outcome = resolver
        .resolve_with(&query, &cancel, |result| {
            let card = ResultCard::from_result(result);
            spinner.suspend(|| println!("{}", card));
        })
        .await;
    spinner.finish_and_clear();

    let results = outcome?;
    let available = results.iter().filter(|r| r.is_available()).count();
    let metrics = oracle.get_metrics_snapshot();

    println!();
    println!("📈 Summary:");
    println!("   ✅ Available: {}", available);
    println!("   ❌ Taken: {}", results.len() - available);
    println!("   🌐 DNS lookups: {}", metrics.lookups + metrics.failures);
    println!("   ⏱️  Total time: {:.2}s", check_start.elapsed().as_secs_f32());

    Ok(())
}

/// Print help information
fn print_help() {
    println!("🔍 Domain Scout - domain availability with alternative TLDs");
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    domain-scout <DOMAIN>");
    println!();
    println!("EXAMPLES:");
    println!("    domain-scout mystartup        # checks mystartup.com plus alternatives");
    println!("    domain-scout mystartup.io     # checks mystartup.io plus alternatives");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    DOMAIN_SCOUT_DOH_URL        DNS-over-HTTPS endpoint (default: https://dns.google/resolve)");
    println!("    DOMAIN_SCOUT_TIMEOUT_SECS   Per-lookup timeout in seconds (default: 5)");
    println!("    DOMAIN_SCOUT_RETRIES        Extra attempts per failed lookup (default: 0)");
    println!("    DOMAIN_SCOUT_PARALLEL       Look up alternatives concurrently (default: false)");
    println!("    RUST_LOG                    Log filter (default: warn)");
    println!();
    println!("NOTES:");
    println!("    • The requested domain and a few popular alternatives are checked live");
    println!("    • Other alternatives show an estimated availability");
    println!("    • Unknown TLDs fall back to .com");
}
