use crate::dns_record::RecordType;
use std::fmt;
use std::sync::Arc;

/// A single outbound wildcard probe: the probe name and the server it goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeQuery {
    pub domain: Arc<str>,
    pub server: Arc<str>,
}

impl ProbeQuery {
    pub fn new(domain: Arc<str>, server: Arc<str>) -> Self {
        Self { domain, server }
    }
}

/// Kind of usable answer a probe produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProbeRecordType {
    A,
    Cname,
}

impl ProbeRecordType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeRecordType::A => "A",
            ProbeRecordType::Cname => "CNAME",
        }
    }

    pub fn record_type(&self) -> RecordType {
        match self {
            ProbeRecordType::A => RecordType::A,
            ProbeRecordType::Cname => RecordType::CNAME,
        }
    }
}

impl fmt::Display for ProbeRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one probe query.
///
/// `record_type == None` is the empty result: the query failed or the
/// server had nothing to say. It carries no target, no addresses and a zero TTL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub domain: Arc<str>,
    pub record_type: Option<ProbeRecordType>,
    /// Canonical name of a CNAME answer, without the trailing dot.
    pub target: Option<String>,
    /// Every A address of the response (A answers only).
    pub ips: Vec<String>,
    /// TTL of the first answer record.
    pub ttl: u32,
}

impl ProbeResult {
    pub fn empty(domain: Arc<str>) -> Self {
        Self {
            domain,
            record_type: None,
            target: None,
            ips: Vec::new(),
            ttl: 0,
        }
    }

    pub fn cname(domain: Arc<str>, target: impl Into<String>, ttl: u32) -> Self {
        Self {
            domain,
            record_type: Some(ProbeRecordType::Cname),
            target: Some(target.into()),
            ips: Vec::new(),
            ttl,
        }
    }

    pub fn a(domain: Arc<str>, ips: Vec<String>, ttl: u32) -> Self {
        Self {
            domain,
            record_type: Some(ProbeRecordType::A),
            target: None,
            ips,
            ttl,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.record_type.is_none()
    }
}
