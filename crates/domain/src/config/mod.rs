//! Configuration module for Wildprobe
//!
//! - `root`: Main configuration and CLI overrides
//! - `resolver`: Authority discovery settings
//! - `probe`: Wildcard probe fan-out and timeouts
//! - `logging`: Logging settings
//! - `errors`: Configuration errors

pub mod errors;
pub mod logging;
pub mod probe;
pub mod resolver;
pub mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use probe::ProbeConfig;
pub use resolver::ResolverConfig;
pub use root::{CliOverrides, Config};
