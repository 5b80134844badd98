use async_trait::async_trait;
use wildprobe_domain::DomainError;

/// NS record lookup used to find the authoritative servers of a root domain.
#[async_trait]
pub trait NameserverLookup: Send + Sync {
    /// Returns the nameserver hostnames exactly as answered (trailing dot
    /// included when the server sent one). An empty list is a valid answer.
    async fn lookup_ns(&self, root_domain: &str) -> Result<Vec<String>, DomainError>;
}
