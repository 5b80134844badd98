//! # Wildprobe
//!
//! Detects wildcard (pan-resolution) DNS for a root domain and classifies
//! brute-force answers against the wildcard signature.

mod bootstrap;
mod di;
mod scan;

use clap::Parser;
use scan::Candidate;
use tracing::info;
use wildprobe_domain::{trim_suffix_point, CliOverrides};

#[derive(Parser)]
#[command(name = "wildprobe")]
#[command(version)]
#[command(about = "Wildcard DNS detection for subdomain brute-forcing")]
struct Cli {
    /// Root domain to probe (e.g. example.com)
    domain: String,

    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Per-query timeout in milliseconds
    #[arg(short = 't', long)]
    timeout_ms: Option<u64>,

    /// Concurrent probes sent to every authoritative server
    #[arg(short = 'q', long)]
    queries_per_server: Option<usize>,

    /// Resolver used for the NS lookup (repeatable, host:port)
    #[arg(short = 'b', long = "bootstrap")]
    bootstrap_servers: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,

    /// Answer to classify after probing, as <value>:<ttl> (repeatable)
    #[arg(long = "candidate")]
    candidates: Vec<Candidate>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let domain = trim_suffix_point(cli.domain.trim()).to_ascii_lowercase();
    if domain.is_empty() {
        anyhow::bail!("Root domain must not be empty");
    }

    let overrides = CliOverrides {
        query_timeout: cli.timeout_ms,
        queries_per_server: cli.queries_per_server,
        log_level: cli.log_level,
        bootstrap_servers: cli.bootstrap_servers,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config.logging);

    info!(domain = %domain, "Starting wildcard scan");

    let use_cases = di::UseCases::new(&config).await?;
    scan::run_scan(&use_cases, &domain, &cli.candidates).await
}
