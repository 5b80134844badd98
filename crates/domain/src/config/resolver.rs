use crate::server_pool::FALLBACK_RESOLVERS;
use serde::{Deserialize, Serialize};

/// Authority discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Resolvers used for the NS lookup of the root domain (e.g. "192.168.1.1:53")
    /// Empty means: read /etc/resolv.conf, then fall back to 8.8.8.8:53
    #[serde(default)]
    pub bootstrap_servers: Vec<String>,

    /// NS lookup attempts before giving up on discovery (default: 3)
    #[serde(default = "default_lookup_retries")]
    pub lookup_retries: u32,

    /// Pool used when discovery gives up
    #[serde(default = "default_fallback_servers")]
    pub fallback_servers: Vec<String>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            bootstrap_servers: vec![],
            lookup_retries: default_lookup_retries(),
            fallback_servers: default_fallback_servers(),
        }
    }
}

fn default_lookup_retries() -> u32 {
    3
}

fn default_fallback_servers() -> Vec<String> {
    FALLBACK_RESOLVERS.iter().map(|s| s.to_string()).collect()
}
