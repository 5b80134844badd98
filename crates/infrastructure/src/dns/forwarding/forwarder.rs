use super::{DnsResponse, MessageBuilder, ResponseParser};
use crate::dns::transport::{create_transport, TransportKind};
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::debug;
use wildprobe_domain::{DomainError, RecordType};

/// Sends single questions to an explicit `host:port` server.
///
/// UDP first; a truncated answer is asked again over TCP when enabled.
#[derive(Debug, Clone)]
pub struct DnsForwarder {
    tcp_fallback: bool,
}

impl DnsForwarder {
    pub fn new() -> Self {
        Self { tcp_fallback: true }
    }

    pub fn with_tcp_fallback(mut self, enabled: bool) -> Self {
        self.tcp_fallback = enabled;
        self
    }

    pub async fn query(
        &self,
        server: &str,
        domain: &str,
        record_type: &RecordType,
        timeout_ms: u64,
    ) -> Result<DnsResponse, DomainError> {
        let start = Instant::now();
        let timeout_duration = Duration::from_millis(timeout_ms);

        let addr = resolve_server(server, timeout_duration).await?;
        let query_bytes = MessageBuilder::build_query(domain, record_type)?;

        let udp = create_transport(TransportKind::Udp, addr);
        let udp_response = udp.send(&query_bytes, timeout_duration).await?;
        let dns_response = ResponseParser::parse(&udp_response.bytes)?;

        if !(dns_response.truncated && self.tcp_fallback) {
            debug!(
                server = %addr,
                domain = %domain,
                record_type = %record_type,
                status = ResponseParser::rcode_to_status(dns_response.rcode),
                latency_ms = start.elapsed().as_millis() as u64,
                "Query answered"
            );
            return Ok(dns_response);
        }

        debug!(server = %addr, "Response truncated (TC bit), retrying via TCP");

        let remaining = timeout_duration
            .checked_sub(start.elapsed())
            .unwrap_or(Duration::from_millis(500));

        let tcp = create_transport(TransportKind::Tcp, addr);
        let tcp_response = tcp.send(&query_bytes, remaining).await?;
        ResponseParser::parse(&tcp_response.bytes)
    }
}

impl Default for DnsForwarder {
    fn default() -> Self {
        Self::new()
    }
}

/// Turns `host:port` into a socket address, resolving hostnames
/// (authoritative servers are discovered by name).
pub async fn resolve_server(server: &str, timeout: Duration) -> Result<SocketAddr, DomainError> {
    if let Ok(addr) = server.parse::<SocketAddr>() {
        return Ok(addr);
    }

    let mut addrs = tokio::time::timeout(timeout, tokio::net::lookup_host(server))
        .await
        .map_err(|_| DomainError::TransportTimeout {
            server: server.to_string(),
        })?
        .map_err(|e| {
            DomainError::InvalidServerAddress(format!("Cannot resolve {}: {}", server, e))
        })?;

    addrs.next().ok_or_else(|| {
        DomainError::InvalidServerAddress(format!("{} resolved to no address", server))
    })
}
