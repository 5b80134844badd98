use std::sync::Arc;
use tracing::info;
use wildprobe_application::use_cases::{DiscoverAuthoritativeServersUseCase, ProbeWildcardUseCase};
use wildprobe_domain::{AuthoritativeServerPool, Config};
use wildprobe_infrastructure::dns::{DnsForwarder, HickoryProbeExchange, NsLookup};

/// Use cases wired to their DNS adapters.
pub struct UseCases {
    pub discover: DiscoverAuthoritativeServersUseCase,
    pub probe: ProbeWildcardUseCase,
}

impl UseCases {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let forwarder = DnsForwarder::new().with_tcp_fallback(config.probe.tcp_fallback);
        let timeout_ms = config.probe.query_timeout;

        let lookup = if config.resolver.bootstrap_servers.is_empty() {
            NsLookup::from_system(forwarder.clone(), timeout_ms).await
        } else {
            NsLookup::new(
                forwarder.clone(),
                config.resolver.bootstrap_servers.clone(),
                timeout_ms,
            )
        };
        info!(bootstrap = ?lookup.bootstrap_servers(), "NS lookup resolvers");

        let fallback = AuthoritativeServerPool::from_servers(&config.resolver.fallback_servers)?;

        let discover = DiscoverAuthoritativeServersUseCase::new(Arc::new(lookup))
            .with_max_attempts(config.resolver.lookup_retries)
            .with_fallback(fallback);

        let probe = ProbeWildcardUseCase::new(Arc::new(HickoryProbeExchange::new(
            forwarder, timeout_ms,
        )))
        .with_queries_per_server(config.probe.queries_per_server);

        Ok(Self { discover, probe })
    }
}
