//! Wildprobe Domain Layer
pub mod config;
pub mod dns_record;
pub mod errors;
pub mod probe;
pub mod server_pool;
pub mod wildcard;

pub use config::{CliOverrides, Config, ConfigError};
pub use dns_record::RecordType;
pub use errors::DomainError;
pub use probe::{ProbeQuery, ProbeRecordType, ProbeResult};
pub use server_pool::{AuthoritativeServerPool, DNS_PORT, FALLBACK_RESOLVERS};
pub use wildcard::{trim_suffix_point, WildcardBlacklist, WildcardRecord};
