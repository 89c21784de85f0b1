use super::{RecordClass, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// A single answer-section resource record.
///
/// `data` is the raw RDATA. Nothing here checks it against `record_type`;
/// the codec refuses to encode a record whose payload length disagrees with
/// its declared type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRecord {
    pub name: Arc<str>,

    pub record_type: RecordType,

    pub record_class: RecordClass,

    pub ttl: u32,

    pub data: Vec<u8>,
}

impl ReplyRecord {
    pub fn new(
        name: impl Into<Arc<str>>,
        record_type: RecordType,
        record_class: RecordClass,
        ttl: u32,
        data: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            record_class,
            ttl,
            data,
        }
    }

    /// Builds an `IN A` record.
    pub fn a(name: impl Into<Arc<str>>, address: Ipv4Addr, ttl: u32) -> Self {
        Self::new(
            name,
            RecordType::A,
            RecordClass::IN,
            ttl,
            address.octets().to_vec(),
        )
    }

    /// Builds an `IN AAAA` record.
    pub fn aaaa(name: impl Into<Arc<str>>, address: Ipv6Addr, ttl: u32) -> Self {
        Self::new(
            name,
            RecordType::AAAA,
            RecordClass::IN,
            ttl,
            address.octets().to_vec(),
        )
    }

    /// Interprets the payload as an IPv4 address when this is a well-formed A record.
    pub fn ipv4(&self) -> Option<Ipv4Addr> {
        if self.record_type != RecordType::A {
            return None;
        }
        let octets: [u8; 4] = self.data.as_slice().try_into().ok()?;
        Some(Ipv4Addr::from(octets))
    }

    /// Interprets the payload as an IPv6 address when this is a well-formed AAAA record.
    pub fn ipv6(&self) -> Option<Ipv6Addr> {
        if self.record_type != RecordType::AAAA {
            return None;
        }
        let octets: [u8; 16] = self.data.as_slice().try_into().ok()?;
        Some(Ipv6Addr::from(octets))
    }
}
