pub mod discover_authorities;
pub mod probe_wildcard;

pub use discover_authorities::DiscoverAuthoritativeServersUseCase;
pub use probe_wildcard::{ProbeOutcome, ProbeWildcardUseCase, WildcardAggregator};
