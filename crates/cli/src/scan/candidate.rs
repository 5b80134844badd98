use std::str::FromStr;

/// A brute-force answer to classify: `<value>:<ttl>`.
///
/// The TTL is split off the last colon, so IPv6 values need no brackets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub record: String,
    pub ttl: u32,
}

impl FromStr for Candidate {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (record, ttl) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("expected <value>:<ttl>, got '{}'", s))?;

        if record.is_empty() {
            return Err(format!("missing value in '{}'", s));
        }

        let ttl = ttl
            .parse::<u32>()
            .map_err(|e| format!("invalid TTL '{}': {}", ttl, e))?;

        Ok(Self {
            record: record.to_string(),
            ttl,
        })
    }
}
