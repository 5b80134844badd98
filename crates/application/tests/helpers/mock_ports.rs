#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use wildprobe_application::ports::{NameserverLookup, ProbeExchange};
use wildprobe_domain::{DomainError, ProbeQuery, ProbeResult};

// ============================================================================
// Mock NameserverLookup
// ============================================================================

/// Answers NS lookups from a script, one entry per call.
///
/// Once the script runs out every further call fails.
pub struct MockNameserverLookup {
    script: Mutex<VecDeque<Result<Vec<String>, DomainError>>>,
    calls: AtomicUsize,
}

impl MockNameserverLookup {
    pub fn new(script: Vec<Result<Vec<String>, DomainError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn answering(hosts: &[&str]) -> Self {
        Self::new(vec![Ok(hosts.iter().map(|h| h.to_string()).collect())])
    }

    pub fn always_failing() -> Self {
        Self::new(vec![])
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn lookup_error() -> DomainError {
    DomainError::TransportTimeout {
        server: "127.0.0.53:53".to_string(),
    }
}

#[async_trait]
impl NameserverLookup for MockNameserverLookup {
    async fn lookup_ns(&self, _root_domain: &str) -> Result<Vec<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(lookup_error()))
    }
}

// ============================================================================
// Mock ProbeExchange
// ============================================================================

/// Scripted reply of a mock server for one probe.
#[derive(Clone, Debug)]
pub enum MockReply {
    A(Vec<&'static str>, u32),
    Cname(&'static str, u32),
    NoAnswer,
    Fail,
}

/// Answers probes per server from a script; servers without a script (or
/// with an exhausted one) repeat their last reply, or answer nothing.
#[derive(Default)]
pub struct MockProbeExchange {
    scripts: Mutex<HashMap<String, VecDeque<MockReply>>>,
    last: Mutex<HashMap<String, MockReply>>,
    queries: Mutex<Vec<ProbeQuery>>,
}

impl MockProbeExchange {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn script(&self, server: &str, replies: Vec<MockReply>) {
        self.scripts
            .lock()
            .await
            .insert(server.to_string(), replies.into());
    }

    pub async fn always(&self, server: &str, reply: MockReply) {
        self.last.lock().await.insert(server.to_string(), reply);
    }

    pub async fn queries(&self) -> Vec<ProbeQuery> {
        self.queries.lock().await.clone()
    }

    pub async fn queries_to(&self, server: &str) -> usize {
        self.queries
            .lock()
            .await
            .iter()
            .filter(|q| q.server.as_ref() == server)
            .count()
    }
}

#[async_trait]
impl ProbeExchange for MockProbeExchange {
    async fn query_a(&self, query: &ProbeQuery) -> Result<ProbeResult, DomainError> {
        self.queries.lock().await.push(query.clone());

        let server = query.server.to_string();
        let scripted = self
            .scripts
            .lock()
            .await
            .get_mut(&server)
            .and_then(|replies| replies.pop_front());

        let reply = match scripted {
            Some(reply) => {
                self.last.lock().await.insert(server, reply.clone());
                reply
            }
            None => self
                .last
                .lock()
                .await
                .get(&server)
                .cloned()
                .unwrap_or(MockReply::NoAnswer),
        };

        let domain = Arc::clone(&query.domain);
        match reply {
            MockReply::A(ips, ttl) => Ok(ProbeResult::a(
                domain,
                ips.into_iter().map(String::from).collect(),
                ttl,
            )),
            MockReply::Cname(target, ttl) => Ok(ProbeResult::cname(domain, target, ttl)),
            MockReply::NoAnswer => Ok(ProbeResult::empty(domain)),
            MockReply::Fail => Err(DomainError::TransportTimeout {
                server: query.server.to_string(),
            }),
        }
    }
}
