use wildprobe_domain::{trim_suffix_point, WildcardBlacklist};

fn blacklist_with(entries: &[(&str, u32)]) -> WildcardBlacklist {
    let mut blacklist = WildcardBlacklist::new();
    for (value, ttl) in entries {
        blacklist.insert(value, *ttl);
    }
    blacklist
}

// ============================================================================
// Classification
// ============================================================================

#[test]
fn test_same_ttl_is_wildcard() {
    let blacklist = blacklist_with(&[("1.2.3.4", 300)]);
    assert!(blacklist.is_wildcard("1.2.3.4", 300));
}

#[test]
fn test_different_ttl_not_round_minute_is_wildcard() {
    let blacklist = blacklist_with(&[("1.2.3.4", 300)]);
    assert!(blacklist.is_wildcard("1.2.3.4", 301));
}

#[test]
fn test_different_round_minute_ttls_are_not_wildcard() {
    let blacklist = blacklist_with(&[("1.2.3.4", 300)]);
    assert!(!blacklist.is_wildcard("1.2.3.4", 360));
}

#[test]
fn test_only_one_side_round_minute_is_wildcard() {
    let blacklist = blacklist_with(&[("1.2.3.4", 299)]);
    assert!(blacklist.is_wildcard("1.2.3.4", 360));
    assert!(blacklist.is_wildcard("1.2.3.4", 0));
}

#[test]
fn test_zero_ttl_counts_as_round_minute() {
    let blacklist = blacklist_with(&[("1.2.3.4", 60)]);
    assert!(!blacklist.is_wildcard("1.2.3.4", 0));
}

#[test]
fn test_missing_key_is_not_wildcard() {
    let blacklist = blacklist_with(&[("1.2.3.4", 300)]);
    assert!(!blacklist.is_wildcard("9.9.9.9", 300));
}

#[test]
fn test_empty_blacklist_never_matches() {
    let blacklist = WildcardBlacklist::new();
    assert!(blacklist.is_empty());
    for ttl in [0, 60, 300, 301, u32::MAX] {
        assert!(!blacklist.is_wildcard("1.2.3.4", ttl));
        assert!(!blacklist.is_wildcard("wild.example.com", ttl));
    }
}

#[test]
fn test_cname_target_with_trailing_dot_matches() {
    let blacklist = blacklist_with(&[("wild.cdn.example.net", 600)]);
    assert!(blacklist.is_wildcard("wild.cdn.example.net.", 600));
    assert!(blacklist.is_wildcard("wild.cdn.example.net", 600));
}

#[test]
fn test_insert_normalizes_keys() {
    let blacklist = blacklist_with(&[("wild.cdn.example.net.", 600)]);
    assert_eq!(blacklist.keys().collect::<Vec<_>>(), vec!["wild.cdn.example.net"]);
    assert_eq!(blacklist.ttl_of("wild.cdn.example.net"), Some(600));
}

#[test]
fn test_insert_overwrites_ttl() {
    let blacklist = blacklist_with(&[("1.2.3.4", 300), ("1.2.3.4", 120)]);
    assert_eq!(blacklist.len(), 1);
    assert_eq!(blacklist.ttl_of("1.2.3.4"), Some(120));
}

// ============================================================================
// Name normalization
// ============================================================================

#[test]
fn test_trim_suffix_point() {
    assert_eq!(trim_suffix_point("ns1.example.com."), "ns1.example.com");
    assert_eq!(trim_suffix_point("ns1.example.com"), "ns1.example.com");
    assert_eq!(trim_suffix_point("."), "");
    assert_eq!(trim_suffix_point(""), "");
}
