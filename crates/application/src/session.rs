use std::sync::Arc;
use tokio::sync::mpsc;
use wildprobe_domain::{AuthoritativeServerPool, WildcardBlacklist, WildcardRecord};

use crate::use_cases::{DiscoverAuthoritativeServersUseCase, ProbeWildcardUseCase};

/// State of one wildcard scan against one root domain.
///
/// Owned by the brute-force driver. The server pool is fixed when the session
/// is created; the blacklist is replaced as a whole by every probe run.
/// Sessions share nothing, so several scans can run side by side.
#[derive(Debug, Clone)]
pub struct ScanSession {
    root_domain: Arc<str>,
    pool: AuthoritativeServerPool,
    blacklist: WildcardBlacklist,
    probe_domain: Option<Arc<str>>,
}

impl ScanSession {
    pub fn new(root_domain: &str, pool: AuthoritativeServerPool) -> Self {
        Self {
            root_domain: Arc::from(root_domain),
            pool,
            blacklist: WildcardBlacklist::new(),
            probe_domain: None,
        }
    }

    /// Starts a session whose pool comes from authority discovery.
    pub async fn discover(
        root_domain: &str,
        discover: &DiscoverAuthoritativeServersUseCase,
    ) -> Self {
        let pool = discover.execute(root_domain).await;
        Self::new(root_domain, pool)
    }

    /// Runs a probing pass, replacing the current blacklist, and hands back
    /// the informational record stream.
    pub async fn probe(&mut self, prober: &ProbeWildcardUseCase) -> mpsc::Receiver<WildcardRecord> {
        let outcome = prober.execute(&self.root_domain, &self.pool).await;
        self.blacklist = outcome.blacklist;
        self.probe_domain = Some(outcome.probe_domain);
        outcome.records
    }

    pub fn is_wildcard(&self, record: &str, ttl: u32) -> bool {
        self.blacklist.is_wildcard(record, ttl)
    }

    pub fn root_domain(&self) -> &str {
        &self.root_domain
    }

    pub fn pool(&self) -> &AuthoritativeServerPool {
        &self.pool
    }

    pub fn blacklist(&self) -> &WildcardBlacklist {
        &self.blacklist
    }

    /// Name used by the last probe run, if any.
    pub fn probe_domain(&self) -> Option<&str> {
        self.probe_domain.as_deref()
    }
}
