use sha1::{Digest, Sha1};
use wildprobe_domain::trim_suffix_point;

/// Builds the wildcard probe name for `root_domain`.
///
/// The label is the hex SHA-1 of the root domain, 40 characters, so it stays
/// within the 63-octet label limit.
pub fn probe_domain(root_domain: &str) -> String {
    let root = trim_suffix_point(root_domain);
    let label: String = Sha1::digest(root.as_bytes())
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect();

    format!("{}.{}", label, root)
}
