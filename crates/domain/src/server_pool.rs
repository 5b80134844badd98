use crate::errors::DomainError;
use crate::wildcard::trim_suffix_point;
use std::fmt;
use std::sync::Arc;

/// Standard DNS port appended to discovered nameserver hosts.
pub const DNS_PORT: u16 = 53;

/// Public resolvers used when the root domain's NS records cannot be found.
pub const FALLBACK_RESOLVERS: [&str; 5] = [
    "8.8.8.8:53",
    "119.29.29.29:53",
    "223.5.5.5:53",
    "223.6.6.6:53",
    "114.114.114.114:53",
];

/// Ordered set of `host:port` resolvers every wildcard probe is sent to.
///
/// The pool is frozen once built: there is no API to add or remove entries,
/// so the fan-out size computed before probing stays valid for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthoritativeServerPool {
    servers: Arc<[Arc<str>]>,
    from_fallback: bool,
}

impl AuthoritativeServerPool {
    /// Builds a pool from discovered nameserver hostnames.
    ///
    /// Trailing root-label dots are stripped and [`DNS_PORT`] is appended.
    pub fn from_nameservers<I, S>(hosts: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let servers = hosts
            .into_iter()
            .map(|host| {
                let host = trim_suffix_point(host.as_ref());
                let server = format_server(host, DNS_PORT);
                validate_server(&server)?;
                Ok(Arc::from(server.as_str()))
            })
            .collect::<Result<Vec<Arc<str>>, DomainError>>()?;

        Ok(Self {
            servers: servers.into(),
            from_fallback: false,
        })
    }

    /// Builds a pool from already formatted `host:port` entries.
    pub fn from_servers<I, S>(servers: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let servers = servers
            .into_iter()
            .map(|server| {
                validate_server(server.as_ref())?;
                Ok(Arc::from(server.as_ref()))
            })
            .collect::<Result<Vec<Arc<str>>, DomainError>>()?;

        Ok(Self {
            servers: servers.into(),
            from_fallback: false,
        })
    }

    /// The built-in list of five public resolvers. Never empty.
    pub fn fallback() -> Self {
        Self {
            servers: FALLBACK_RESOLVERS.iter().map(|s| Arc::from(*s)).collect(),
            from_fallback: true,
        }
    }

    /// Marks a pool built from configured fallback servers.
    pub fn into_fallback(mut self) -> Self {
        self.from_fallback = true;
        self
    }

    pub fn servers(&self) -> &[Arc<str>] {
        &self.servers
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.servers.iter().map(|s| s.as_ref())
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    /// True when discovery gave up and the pool holds public resolvers.
    pub fn is_fallback(&self) -> bool {
        self.from_fallback
    }
}

impl fmt::Display for AuthoritativeServerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.iter().collect();
        write!(f, "[{}]", joined.join(", "))
    }
}

fn format_server(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

/// Checks that `server` is a `host:port` string.
///
/// IPv6 literals must be bracketed (`[2001:db8::1]:53`).
pub fn validate_server(server: &str) -> Result<(), DomainError> {
    let invalid = || DomainError::InvalidServerAddress(server.to_string());

    let (host, port) = server.rsplit_once(':').ok_or_else(invalid)?;
    if host.is_empty() || port.parse::<u16>().is_err() {
        return Err(invalid());
    }

    if host.starts_with('[') {
        if !host.ends_with(']') || host.len() < 3 {
            return Err(invalid());
        }
    } else if host.contains(':') || host.contains(char::is_whitespace) {
        return Err(invalid());
    }

    Ok(())
}
