//! Protocol / address-family buckets.
//!
//! Every service lands in exactly one of four tables. The address family
//! is a string heuristic, not a parse: anything equal to `::` or containing
//! a colon is v6, everything else (including the `0.0.0.0` and `*`
//! wildcards) is v4.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::Service;

/// One of the four service tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableBucket {
    Tcpv4,
    Tcpv6,
    Udpv4,
    Udpv6,
}

impl TableBucket {
    /// Display and tab order.
    pub const ALL: [TableBucket; 4] = [
        TableBucket::Tcpv4,
        TableBucket::Tcpv6,
        TableBucket::Udpv4,
        TableBucket::Udpv6,
    ];

    /// Identifier used on the wire and in container ids.
    pub fn as_str(self) -> &'static str {
        match self {
            TableBucket::Tcpv4 => "tcpv4",
            TableBucket::Tcpv6 => "tcpv6",
            TableBucket::Udpv4 => "udpv4",
            TableBucket::Udpv6 => "udpv6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TableBucket::Tcpv4 => "TCPv4",
            TableBucket::Tcpv6 => "TCPv6",
            TableBucket::Udpv4 => "UDPv4",
            TableBucket::Udpv6 => "UDPv6",
        }
    }

    /// UDP tables shorten long listen addresses.
    pub fn truncates_listen_addr(self) -> bool {
        matches!(self, TableBucket::Udpv4 | TableBucket::Udpv6)
    }

    /// Bucket for a protocol and local address, or `None` for protocols
    /// other than tcp and udp.
    pub fn classify(protocol: &str, local_addr: &str) -> Option<TableBucket> {
        let v6 = is_v6_addr(local_addr);
        match (protocol, v6) {
            ("tcp", false) => Some(TableBucket::Tcpv4),
            ("tcp", true) => Some(TableBucket::Tcpv6),
            ("udp", false) => Some(TableBucket::Udpv4),
            ("udp", true) => Some(TableBucket::Udpv6),
            _ => None,
        }
    }

    pub fn for_service(service: &Service) -> Option<TableBucket> {
        Self::classify(&service.protocol, &service.local_addr)
    }
}

impl fmt::Display for TableBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TableBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcpv4" => Ok(TableBucket::Tcpv4),
            "tcpv6" => Ok(TableBucket::Tcpv6),
            "udpv4" => Ok(TableBucket::Udpv4),
            "udpv6" => Ok(TableBucket::Udpv6),
            other => Err(format!("unknown table: {other}")),
        }
    }
}

pub fn is_v6_addr(addr: &str) -> bool {
    addr == "::" || addr.contains(':')
}

/// Wildcard bind addresses whose links resolve through each interface IP.
pub fn is_wildcard_addr(addr: &str) -> bool {
    matches!(addr, "0.0.0.0" | "*" | "::")
}

/// Services split by bucket, each bucket ordered by ascending port.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketedServices {
    buckets: BTreeMap<TableBucket, Vec<Service>>,
}

impl BucketedServices {
    pub fn get(&self, bucket: TableBucket) -> &[Service] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Partition a snapshot into the four tables.
///
/// Services with an unknown protocol are dropped. Ordering within a bucket
/// is a stable sort by numeric port (non-numeric ports sort as 0).
pub fn partition(services: &[Service]) -> BucketedServices {
    let mut buckets: BTreeMap<TableBucket, Vec<Service>> = BTreeMap::new();
    for service in services {
        match TableBucket::for_service(service) {
            Some(bucket) => buckets.entry(bucket).or_default().push(service.clone()),
            None => log::debug!(
                "skipping service {} with protocol {:?}",
                service.id(),
                service.protocol
            ),
        }
    }
    for list in buckets.values_mut() {
        list.sort_by_key(Service::port_number);
    }
    BucketedServices { buckets }
}
