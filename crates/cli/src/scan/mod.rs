pub mod candidate;

pub use candidate::Candidate;

use crate::di::UseCases;
use wildprobe_application::ScanSession;
use wildprobe_domain::ProbeRecordType;

/// Discovers the authorities of `domain`, probes them once and prints the
/// wildcard records followed by one verdict per candidate.
pub async fn run_scan(
    use_cases: &UseCases,
    domain: &str,
    candidates: &[Candidate],
) -> anyhow::Result<()> {
    let mut session = ScanSession::discover(domain, &use_cases.discover).await;

    println!(
        "{} servers{}: {}",
        domain,
        if session.pool().is_fallback() {
            " (fallback)"
        } else {
            ""
        },
        session.pool()
    );

    let mut records = session.probe(&use_cases.probe).await;
    let mut any = false;
    while let Some(record) = records.recv().await {
        any = true;
        match record.record_type {
            ProbeRecordType::Cname => println!(
                "wildcard {} CNAME {}",
                record.domain,
                record.target.as_deref().unwrap_or_default()
            ),
            ProbeRecordType::A => {
                println!("wildcard {} A {}", record.domain, record.ips.join(","))
            }
        }
    }
    if !any {
        println!("no wildcard resolution for {}", domain);
    }

    for candidate in candidates {
        let verdict = if session.is_wildcard(&candidate.record, candidate.ttl) {
            "wildcard"
        } else {
            "genuine"
        };
        println!("{} ttl={} {}", candidate.record, candidate.ttl, verdict);
    }

    Ok(())
}
