use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use wildprobe_domain::AuthoritativeServerPool;

use crate::ports::NameserverLookup;

const DEFAULT_LOOKUP_ATTEMPTS: u32 = 3;

/// Finds the authoritative nameservers of a root domain.
///
/// Tries the NS lookup up to `max_attempts` times back to back and gives up
/// with the fallback pool. Never fails and never returns an empty pool.
pub struct DiscoverAuthoritativeServersUseCase {
    lookup: Arc<dyn NameserverLookup>,
    max_attempts: u32,
    fallback: AuthoritativeServerPool,
}

impl DiscoverAuthoritativeServersUseCase {
    pub fn new(lookup: Arc<dyn NameserverLookup>) -> Self {
        Self {
            lookup,
            max_attempts: DEFAULT_LOOKUP_ATTEMPTS,
            fallback: AuthoritativeServerPool::fallback(),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Replaces the built-in fallback pool. An empty pool is ignored.
    pub fn with_fallback(mut self, fallback: AuthoritativeServerPool) -> Self {
        if !fallback.is_empty() {
            self.fallback = fallback.into_fallback();
        }
        self
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, root_domain: &str) -> AuthoritativeServerPool {
        let mut remaining = self.max_attempts;

        while remaining > 0 {
            match self.lookup.lookup_ns(root_domain).await {
                Ok(hosts) if !hosts.is_empty() => {
                    match AuthoritativeServerPool::from_nameservers(&hosts) {
                        Ok(pool) => {
                            info!(
                                root_domain = %root_domain,
                                servers = %pool,
                                "Authoritative servers discovered"
                            );
                            return pool;
                        }
                        Err(e) => {
                            debug!(root_domain = %root_domain, error = %e, "Unusable NS answer");
                        }
                    }
                }
                Ok(_) => {
                    debug!(root_domain = %root_domain, "NS lookup returned no records");
                }
                Err(e) => {
                    debug!(root_domain = %root_domain, error = %e, "NS lookup failed");
                }
            }

            remaining -= 1;
            if remaining > 0 {
                debug!(root_domain = %root_domain, remaining, "Retrying NS lookup");
            }
        }

        warn!(
            root_domain = %root_domain,
            servers = %self.fallback,
            "No NS record, using fallback resolvers"
        );
        self.fallback.clone()
    }
}
