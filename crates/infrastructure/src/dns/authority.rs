use crate::dns::forwarding::{DnsForwarder, ResponseParser};
use crate::system::resolv_conf;
use async_trait::async_trait;
use tracing::debug;
use wildprobe_application::ports::NameserverLookup;
use wildprobe_domain::{DomainError, RecordType};

/// Resolver used for NS lookups when none is configured or found.
pub const DEFAULT_BOOTSTRAP_SERVER: &str = "8.8.8.8:53";

/// NS lookup through recursive "bootstrap" resolvers.
///
/// Resolvers are tried in order; the first one that answers with at least one
/// NS record wins. Answers without NS records count as empty, not as errors.
/// SERVFAIL, REFUSED and NOTIMP count as a failure of that resolver.
pub struct NsLookup {
    forwarder: DnsForwarder,
    bootstrap_servers: Vec<String>,
    timeout_ms: u64,
}

impl NsLookup {
    pub fn new(forwarder: DnsForwarder, bootstrap_servers: Vec<String>, timeout_ms: u64) -> Self {
        Self {
            forwarder,
            bootstrap_servers,
            timeout_ms,
        }
    }

    /// Uses the nameservers of the system resolver configuration, or
    /// [`DEFAULT_BOOTSTRAP_SERVER`] when there are none.
    pub async fn from_system(forwarder: DnsForwarder, timeout_ms: u64) -> Self {
        let mut servers = resolv_conf::system_nameservers().await;
        if servers.is_empty() {
            debug!("No system nameservers, using {}", DEFAULT_BOOTSTRAP_SERVER);
            servers.push(DEFAULT_BOOTSTRAP_SERVER.to_string());
        }
        Self::new(forwarder, servers, timeout_ms)
    }

    pub fn bootstrap_servers(&self) -> &[String] {
        &self.bootstrap_servers
    }
}

#[async_trait]
impl NameserverLookup for NsLookup {
    async fn lookup_ns(&self, root_domain: &str) -> Result<Vec<String>, DomainError> {
        let mut last_error = None;
        let mut answered = false;

        for server in &self.bootstrap_servers {
            match self
                .forwarder
                .query(server, root_domain, &RecordType::NS, self.timeout_ms)
                .await
            {
                Ok(response) if response.is_server_error() => {
                    let status = ResponseParser::rcode_to_status(response.rcode);
                    debug!(root_domain = %root_domain, server = %server, status, "NS lookup refused");
                    last_error = Some(DomainError::InvalidDnsResponse(format!(
                        "{} answered {}",
                        server, status
                    )));
                }
                Ok(response) => {
                    let hosts = response.nameservers();
                    if !hosts.is_empty() {
                        debug!(
                            root_domain = %root_domain,
                            server = %server,
                            nameservers = hosts.len(),
                            "NS lookup successful"
                        );
                        return Ok(hosts);
                    }
                    answered = true;
                    debug!(root_domain = %root_domain, server = %server, "NS lookup returned no records");
                }
                Err(e) => {
                    debug!(root_domain = %root_domain, server = %server, error = %e, "NS lookup failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(e) if !answered => Err(e),
            _ => Ok(Vec::new()),
        }
    }
}
