#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, UdpSocket};
use tokio::sync::oneshot;

/// What the mock server answers to every query.
#[derive(Clone, Debug)]
pub enum MockAnswer {
    /// One A record per address, all with the same TTL.
    A { ips: Vec<Ipv4Addr>, ttl: u32 },
    /// A single CNAME record.
    Cname { target: &'static str, ttl: u32 },
    /// CNAME followed by A records for the target.
    CnameChain {
        target: &'static str,
        cname_ttl: u32,
        ips: Vec<Ipv4Addr>,
        a_ttl: u32,
    },
    /// NS records for the queried name.
    Ns { hosts: Vec<&'static str>, ttl: u32 },
    NxDomain,
    ServFail,
    /// UDP answers carry the TC bit and no records; TCP gets the full answer.
    Truncated(Box<MockAnswer>),
    /// Never answers.
    Silent,
}

/// Mock DNS server for tests that must not depend on real DNS.
///
/// Listens on an ephemeral UDP port of 127.0.0.1 and on TCP on the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    queries: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(answer: MockAnswer) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let listener = TcpListener::bind(addr).await?;

        let queries = Arc::new(AtomicUsize::new(0));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let udp_queries = Arc::clone(&queries);
        let udp_answer = answer.clone();
        let tcp_answer = answer;

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            udp_queries.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = Self::build_response(&buf[..len], &udp_answer, false) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                    accepted = listener.accept() => {
                        if let Ok((mut stream, _)) = accepted {
                            let answer = tcp_answer.clone();
                            tokio::spawn(async move {
                                let mut len_buf = [0u8; 2];
                                if stream.read_exact(&mut len_buf).await.is_err() {
                                    return;
                                }
                                let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
                                if stream.read_exact(&mut query).await.is_err() {
                                    return;
                                }
                                if let Some(response) = Self::build_response(&query, &answer, true) {
                                    let mut framed = (response.len() as u16).to_be_bytes().to_vec();
                                    framed.extend_from_slice(&response);
                                    let _ = stream.write_all(&framed).await;
                                }
                            });
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            queries,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// `host:port` form used by the server pool.
    pub fn server(&self) -> String {
        self.addr.to_string()
    }

    /// UDP queries received so far.
    pub fn udp_queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    /// Builds the wire response for `query`, `None` when the server stays silent.
    pub fn build_response(query: &[u8], answer: &MockAnswer, over_tcp: bool) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let (answer, truncated) = match answer {
            MockAnswer::Silent => return None,
            MockAnswer::Truncated(_) if !over_tcp => (MockAnswer::A { ips: vec![], ttl: 0 }, true),
            MockAnswer::Truncated(inner) => ((**inner).clone(), false),
            other => (other.clone(), false),
        };

        let records = Self::answer_records(&answer);

        let mut response = Vec::with_capacity(512);

        // Transaction ID
        response.extend_from_slice(&query[0..2]);

        // Flags: QR=1, RD=1 (+TC) / RA=1 (+RCODE)
        response.push(if truncated { 0x83 } else { 0x81 });
        response.push(match answer {
            MockAnswer::NxDomain => 0x83,
            MockAnswer::ServFail => 0x82,
            _ => 0x80,
        });

        // Questions count (from query)
        response.extend_from_slice(&query[4..6]);

        // Answers count
        response.extend_from_slice(&(records.len() as u16).to_be_bytes());

        // Authority RRs: 0, Additional RRs: 0
        response.extend_from_slice(&[0x00, 0x00, 0x00, 0x00]);

        // Question section (rest of query)
        response.extend_from_slice(&query[12..]);

        for record in records {
            response.extend_from_slice(&record);
        }

        Some(response)
    }

    fn answer_records(answer: &MockAnswer) -> Vec<Vec<u8>> {
        // Name pointer to the question
        const QNAME: [u8; 2] = [0xc0, 0x0c];

        match answer {
            MockAnswer::A { ips, ttl } => ips
                .iter()
                .map(|ip| Self::record(&QNAME, 1, *ttl, &ip.octets()))
                .collect(),
            MockAnswer::Cname { target, ttl } => {
                vec![Self::record(&QNAME, 5, *ttl, &encode_name(target))]
            }
            MockAnswer::CnameChain {
                target,
                cname_ttl,
                ips,
                a_ttl,
            } => {
                let owner = encode_name(target);
                let mut records = vec![Self::record(&QNAME, 5, *cname_ttl, &owner)];
                records.extend(
                    ips.iter()
                        .map(|ip| Self::record(&owner, 1, *a_ttl, &ip.octets())),
                );
                records
            }
            MockAnswer::Ns { hosts, ttl } => hosts
                .iter()
                .map(|host| Self::record(&QNAME, 2, *ttl, &encode_name(host)))
                .collect(),
            MockAnswer::NxDomain
            | MockAnswer::ServFail
            | MockAnswer::Silent
            | MockAnswer::Truncated(_) => vec![],
        }
    }

    fn record(owner: &[u8], rtype: u16, ttl: u32, rdata: &[u8]) -> Vec<u8> {
        let mut record = Vec::with_capacity(owner.len() + 10 + rdata.len());
        record.extend_from_slice(owner);
        record.extend_from_slice(&rtype.to_be_bytes());
        record.extend_from_slice(&[0x00, 0x01]); // Class IN
        record.extend_from_slice(&ttl.to_be_bytes());
        record.extend_from_slice(&(rdata.len() as u16).to_be_bytes());
        record.extend_from_slice(rdata);
        record
    }

    /// Stops the server
    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Uncompressed wire encoding of a domain name.
pub fn encode_name(name: &str) -> Vec<u8> {
    let mut encoded = Vec::with_capacity(name.len() + 2);
    for label in name.trim_end_matches('.').split('.') {
        encoded.push(label.len() as u8);
        encoded.extend_from_slice(label.as_bytes());
    }
    encoded.push(0);
    encoded
}

/// Minimal A query for `name` with the given ID.
pub fn raw_query(id: u16, name: &str) -> Vec<u8> {
    let mut query = Vec::with_capacity(32);
    query.extend_from_slice(&id.to_be_bytes());
    query.extend_from_slice(&[0x01, 0x00]); // RD
    query.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    query.extend_from_slice(&encode_name(name));
    query.extend_from_slice(&[0x00, 0x01, 0x00, 0x01]); // Type A, class IN
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_server_responds() {
        let server = MockDnsServer::start(MockAnswer::A {
            ips: vec![Ipv4Addr::new(93, 184, 216, 34)],
            ttl: 60,
        })
        .await
        .unwrap();

        let client = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let query = raw_query(0x1234, "example.com");
        client.send_to(&query, server.addr()).await.unwrap();

        let mut buf = vec![0u8; 512];
        let (len, _) = client.recv_from(&mut buf).await.unwrap();

        assert!(len > query.len(), "Response should carry the answer");
        assert_eq!(buf[0..2], query[0..2], "Transaction ID should match");
        assert_eq!(buf[2] & 0x80, 0x80, "QR bit should be set (response)");
        assert_eq!(server.udp_queries(), 1);

        server.shutdown();
    }

    #[test]
    fn test_encode_name() {
        assert_eq!(
            encode_name("a.bc."),
            vec![1, b'a', 2, b'b', b'c', 0]
        );
    }
}
