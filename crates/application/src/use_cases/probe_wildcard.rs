use rustc_hash::FxHashSet;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};
use wildprobe_domain::{
    trim_suffix_point, AuthoritativeServerPool, ProbeQuery, ProbeRecordType, ProbeResult,
    WildcardBlacklist, WildcardRecord,
};

use crate::ports::ProbeExchange;
use crate::services::probe_domain;

const DEFAULT_QUERIES_PER_SERVER: usize = 5;

/// What one probing pass produced.
pub struct ProbeOutcome {
    /// The synthetic name every server was asked about.
    pub probe_domain: Arc<str>,
    /// Wildcard signature used for classification.
    pub blacklist: WildcardBlacklist,
    /// Finite stream of distinct CNAME targets and the aggregated address
    /// list, for reporting. Closed once every entry has been sent.
    pub records: mpsc::Receiver<WildcardRecord>,
    /// Number of queries dispatched.
    pub dispatched: usize,
    /// Number of results carrying an A or CNAME answer.
    pub answered: usize,
}

/// Folds probe results into the blacklist and the distinct-value sets.
///
/// Insertion is set membership plus overwrite-by-key, so the outcome does
/// not depend on the order results arrive in.
#[derive(Debug, Default)]
pub struct WildcardAggregator {
    blacklist: WildcardBlacklist,
    cnames: FxHashSet<String>,
    ips: FxHashSet<String>,
    answered: usize,
}

impl WildcardAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn absorb(&mut self, result: ProbeResult) {
        match result.record_type {
            // TODO: decide whether a CNAME wildcard should also blacklist the
            // addresses its target resolves to.
            Some(ProbeRecordType::Cname) => {
                if let Some(target) = result.target {
                    let target = trim_suffix_point(&target).to_string();
                    self.blacklist.insert(&target, result.ttl);
                    self.cnames.insert(target);
                    self.answered += 1;
                }
            }
            Some(ProbeRecordType::A) => {
                for ip in result.ips {
                    self.blacklist.insert(&ip, result.ttl);
                    self.ips.insert(ip);
                }
                self.answered += 1;
            }
            None => {}
        }
    }

    pub fn blacklist(&self) -> &WildcardBlacklist {
        &self.blacklist
    }

    pub fn answered(&self) -> usize {
        self.answered
    }

    /// Stream entries: one per distinct CNAME target, then one `A` entry with
    /// every distinct address when any were seen. Sorted for stable output.
    pub fn records(&self, domain: &Arc<str>) -> Vec<WildcardRecord> {
        let mut cnames: Vec<String> = self.cnames.iter().cloned().collect();
        cnames.sort_unstable();

        let mut records: Vec<WildcardRecord> = cnames
            .into_iter()
            .map(|target| WildcardRecord::cname(Arc::clone(domain), target))
            .collect();

        if !self.ips.is_empty() {
            let mut ips: Vec<String> = self.ips.iter().cloned().collect();
            ips.sort_unstable();
            records.push(WildcardRecord::addresses(Arc::clone(domain), ips));
        }

        records
    }

    pub fn into_blacklist(self) -> WildcardBlacklist {
        self.blacklist
    }
}

/// Probes the pool with a nonexistent name and builds the wildcard signature.
pub struct ProbeWildcardUseCase {
    exchange: Arc<dyn ProbeExchange>,
    queries_per_server: usize,
}

impl ProbeWildcardUseCase {
    pub fn new(exchange: Arc<dyn ProbeExchange>) -> Self {
        Self {
            exchange,
            queries_per_server: DEFAULT_QUERIES_PER_SERVER,
        }
    }

    pub fn with_queries_per_server(mut self, queries_per_server: usize) -> Self {
        self.queries_per_server = queries_per_server;
        self
    }

    pub fn queries_per_server(&self) -> usize {
        self.queries_per_server
    }

    #[instrument(skip(self, pool), fields(servers = pool.len()))]
    pub async fn execute(&self, root_domain: &str, pool: &AuthoritativeServerPool) -> ProbeOutcome {
        let domain: Arc<str> = Arc::from(probe_domain(root_domain));
        let expected = pool.len() * self.queries_per_server;

        debug!(probe_domain = %domain, expected, "Dispatching wildcard probes");

        let (tx, mut rx) = mpsc::channel::<ProbeResult>(expected.max(1));

        for server in pool.servers() {
            for _ in 0..self.queries_per_server {
                let tx = tx.clone();
                let exchange = Arc::clone(&self.exchange);
                let query = ProbeQuery::new(Arc::clone(&domain), Arc::clone(server));

                tokio::spawn(async move {
                    let result = match exchange.query_a(&query).await {
                        Ok(result) => result,
                        Err(e) => {
                            debug!(server = %query.server, error = %e, "Wildcard probe failed");
                            ProbeResult::empty(Arc::clone(&query.domain))
                        }
                    };
                    let _ = tx.send(result).await;
                });
            }
        }

        // Each task owns a sender clone; the channel closes when the last one
        // reports (or dies), which is the completion signal for the barrier.
        drop(tx);

        let mut aggregator = WildcardAggregator::new();
        let mut received = 0usize;
        while let Some(result) = rx.recv().await {
            received += 1;
            aggregator.absorb(result);
        }

        if received != expected {
            warn!(
                expected,
                received, "Some wildcard probe tasks ended without reporting"
            );
        }

        let records = aggregator.records(&domain);
        let answered = aggregator.answered();
        let blacklist = aggregator.into_blacklist();

        info!(
            root_domain = %root_domain,
            probe_domain = %domain,
            answered,
            dispatched = expected,
            blacklisted = blacklist.len(),
            "Wildcard probe finished"
        );
        debug!(blacklist = ?blacklist, "Wildcard blacklist");

        ProbeOutcome {
            probe_domain: domain,
            blacklist,
            records: emit_records(records),
            dispatched: expected,
            answered,
        }
    }
}

fn emit_records(records: Vec<WildcardRecord>) -> mpsc::Receiver<WildcardRecord> {
    let (tx, rx) = mpsc::channel(records.len().max(1));

    tokio::spawn(async move {
        for record in records {
            if tx.send(record).await.is_err() {
                break;
            }
        }
    });

    rx
}
