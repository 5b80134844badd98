pub mod authority;
pub mod forwarding;
pub mod probe;
pub mod transport;

pub use authority::NsLookup;
pub use forwarding::{DnsForwarder, DnsResponse, MessageBuilder, ResponseParser};
pub use probe::HickoryProbeExchange;
