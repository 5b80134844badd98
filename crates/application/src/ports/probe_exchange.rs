use async_trait::async_trait;
use wildprobe_domain::{DomainError, ProbeQuery, ProbeResult};

/// Sends one A-record wildcard probe to one server.
#[async_trait]
pub trait ProbeExchange: Send + Sync {
    /// Resolves `query.domain` with type A against `query.server`.
    ///
    /// `Ok` with an empty [`ProbeResult`] means the server answered without
    /// any usable A/CNAME record; transport and protocol failures are `Err`.
    async fn query_a(&self, query: &ProbeQuery) -> Result<ProbeResult, DomainError>;
}
