pub mod nameserver_lookup;
pub mod probe_exchange;

pub use nameserver_lookup::NameserverLookup;
pub use probe_exchange::ProbeExchange;
