use crate::probe::ProbeRecordType;
use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Strips a single trailing root-label dot (`"a.example.com."` → `"a.example.com"`).
pub fn trim_suffix_point(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Wildcard signature of a root domain.
///
/// Maps a normalized answer value (CNAME target or IP string) to the TTL the
/// authoritative servers returned for the probe name. Built in one pass by
/// the prober and only read afterwards; a re-probe builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WildcardBlacklist {
    entries: FxHashMap<String, u32>,
}

impl WildcardBlacklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` with `ttl`, overwriting any earlier TTL for it.
    pub fn insert(&mut self, value: &str, ttl: u32) {
        self.entries.insert(trim_suffix_point(value).to_string(), ttl);
    }

    pub fn ttl_of(&self, value: &str) -> Option<u32> {
        self.entries.get(trim_suffix_point(value)).copied()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.entries.contains_key(trim_suffix_point(value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Decides whether a resolved candidate value is wildcard noise.
    ///
    /// Values not in the blacklist are genuine. A blacklisted value with the
    /// same TTL is a wildcard hit. With a different TTL it is still a hit,
    /// except when both TTLs are whole minutes: some zones rotate wildcard
    /// TTLs in round-minute steps, so two different round-minute TTLs are
    /// taken as a coincidental match and the candidate is let through.
    pub fn is_wildcard(&self, record: &str, ttl: u32) -> bool {
        match self.ttl_of(record) {
            None => false,
            Some(known) if known == ttl => true,
            Some(known) => !(known % 60 == 0 && ttl % 60 == 0),
        }
    }
}

/// Informational entry of the wildcard record stream.
///
/// One entry per distinct CNAME target, plus one `A` entry listing every
/// distinct address observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WildcardRecord {
    pub domain: Arc<str>,
    pub record_type: ProbeRecordType,
    pub target: Option<String>,
    pub ips: Vec<String>,
}

impl WildcardRecord {
    pub fn cname(domain: Arc<str>, target: String) -> Self {
        Self {
            domain,
            record_type: ProbeRecordType::Cname,
            target: Some(target),
            ips: Vec::new(),
        }
    }

    pub fn addresses(domain: Arc<str>, ips: Vec<String>) -> Self {
        Self {
            domain,
            record_type: ProbeRecordType::A,
            target: None,
            ips,
        }
    }
}
