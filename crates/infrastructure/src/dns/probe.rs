use crate::dns::forwarding::{AnswerRecord, DnsForwarder, DnsResponse};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;
use wildprobe_application::ports::ProbeExchange;
use wildprobe_domain::{trim_suffix_point, DomainError, ProbeQuery, ProbeResult, RecordType};

/// Sends wildcard probes as plain A questions through [`DnsForwarder`].
pub struct HickoryProbeExchange {
    forwarder: DnsForwarder,
    timeout_ms: u64,
}

impl HickoryProbeExchange {
    pub fn new(forwarder: DnsForwarder, timeout_ms: u64) -> Self {
        Self {
            forwarder,
            timeout_ms,
        }
    }
}

#[async_trait]
impl ProbeExchange for HickoryProbeExchange {
    async fn query_a(&self, query: &ProbeQuery) -> Result<ProbeResult, DomainError> {
        let response = self
            .forwarder
            .query(&query.server, &query.domain, &RecordType::A, self.timeout_ms)
            .await?;

        let result = probe_result(Arc::clone(&query.domain), &response);
        debug!(
            server = %query.server,
            record_type = result.record_type.map(|t| t.as_str()).unwrap_or("-"),
            ttl = result.ttl,
            "Wildcard probe answered"
        );
        Ok(result)
    }
}

/// Reads the probe signature out of a response.
///
/// Only the first answer decides the type: a leading CNAME yields its target,
/// a leading A yields every A address of the answer section. TTL comes from
/// the first answer either way.
pub fn probe_result(domain: Arc<str>, response: &DnsResponse) -> ProbeResult {
    match response.first_answer() {
        Some(AnswerRecord::Cname { target, ttl }) => {
            ProbeResult::cname(domain, trim_suffix_point(target), *ttl)
        }
        Some(AnswerRecord::A { ttl, .. }) => {
            let ips = response
                .addresses()
                .iter()
                .map(|ip| ip.to_string())
                .collect();
            ProbeResult::a(domain, ips, *ttl)
        }
        _ => ProbeResult::empty(domain),
    }
}
