use std::net::IpAddr;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};
use wildprobe_domain::DNS_PORT;

pub const RESOLV_CONF_PATH: &str = "/etc/resolv.conf";

/// Nameservers of the system resolver as `host:port`, empty when unavailable.
pub async fn system_nameservers() -> Vec<String> {
    read_nameservers(RESOLV_CONF_PATH).await
}

pub async fn read_nameservers(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    match fs::read_to_string(path).await {
        Ok(content) => {
            let servers = parse_nameservers(&content);
            debug!(path = %path.display(), nameservers = servers.len(), "Resolver config read");
            servers
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Failed to read resolver config");
            Vec::new()
        }
    }
}

/// Extracts `nameserver` entries from resolv.conf content.
///
/// Comments (`#`, `;`) and malformed addresses are skipped; IPv6 zone ids
/// are dropped.
pub fn parse_nameservers(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#') && !line.starts_with(';'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            match (fields.next(), fields.next()) {
                (Some("nameserver"), Some(addr)) => Some(addr),
                _ => None,
            }
        })
        .filter_map(|addr| {
            let addr = addr.split('%').next().unwrap_or(addr);
            match addr.parse::<IpAddr>() {
                Ok(IpAddr::V4(v4)) => Some(format!("{}:{}", v4, DNS_PORT)),
                Ok(IpAddr::V6(v6)) => Some(format!("[{}]:{}", v6, DNS_PORT)),
                Err(_) => None,
            }
        })
        .collect()
}
