use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;
use wildprobe_domain::DomainError;

/// One answer-section record, reduced to what wildcard detection looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerRecord {
    A { address: Ipv4Addr, ttl: u32 },
    /// `target` is kept as sent on the wire (fully qualified, trailing dot).
    Cname { target: String, ttl: u32 },
    Ns { host: String, ttl: u32 },
    Other { ttl: u32 },
}

impl AnswerRecord {
    pub fn ttl(&self) -> u32 {
        match self {
            AnswerRecord::A { ttl, .. }
            | AnswerRecord::Cname { ttl, .. }
            | AnswerRecord::Ns { ttl, .. }
            | AnswerRecord::Other { ttl } => *ttl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DnsResponse {
    /// Answer section, in wire order.
    pub answers: Vec<AnswerRecord>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl DnsResponse {
    pub fn first_answer(&self) -> Option<&AnswerRecord> {
        self.answers.first()
    }

    /// Every A address of the answer section, whatever its position.
    pub fn addresses(&self) -> Vec<Ipv4Addr> {
        self.answers
            .iter()
            .filter_map(|answer| match answer {
                AnswerRecord::A { address, .. } => Some(*address),
                _ => None,
            })
            .collect()
    }

    pub fn nameservers(&self) -> Vec<String> {
        self.answers
            .iter()
            .filter_map(|answer| match answer {
                AnswerRecord::Ns { host, .. } => Some(host.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn is_nodata(&self) -> bool {
        self.rcode == ResponseCode::NoError && self.answers.is_empty()
    }

    pub fn is_nxdomain(&self) -> bool {
        self.rcode == ResponseCode::NXDomain
    }

    pub fn is_server_error(&self) -> bool {
        matches!(
            self.rcode,
            ResponseCode::ServFail | ResponseCode::Refused | ResponseCode::NotImp
        )
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let answers: Vec<AnswerRecord> = message
            .answers()
            .iter()
            .map(|record| {
                let ttl = record.ttl();
                match record.data() {
                    RData::A(a) => AnswerRecord::A { address: a.0, ttl },
                    RData::CNAME(canonical) => AnswerRecord::Cname {
                        target: canonical.to_utf8(),
                        ttl,
                    },
                    RData::NS(ns) => AnswerRecord::Ns {
                        host: ns.to_utf8(),
                        ttl,
                    },
                    _ => AnswerRecord::Other { ttl },
                }
            })
            .collect();

        debug!(
            rcode = ?rcode,
            answers = answers.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(DnsResponse {
            answers,
            rcode,
            truncated,
        })
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
