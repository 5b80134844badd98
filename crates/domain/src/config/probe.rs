use serde::{Deserialize, Serialize};

/// Wildcard probe configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeConfig {
    /// Concurrent A queries sent to every server of the pool (default: 5)
    /// Redundancy absorbs single dropped UDP packets.
    #[serde(default = "default_queries_per_server")]
    pub queries_per_server: usize,

    /// Per-query timeout in milliseconds (default: 2000)
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,

    /// Retry truncated UDP answers over TCP (default: true)
    #[serde(default = "default_tcp_fallback")]
    pub tcp_fallback: bool,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            queries_per_server: default_queries_per_server(),
            query_timeout: default_query_timeout(),
            tcp_fallback: default_tcp_fallback(),
        }
    }
}

fn default_queries_per_server() -> usize {
    5
}

fn default_query_timeout() -> u64 {
    2000
}

fn default_tcp_fallback() -> bool {
    true
}
