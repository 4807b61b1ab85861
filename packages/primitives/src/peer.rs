//! Peer struct used by the swarm database.
//!
//! A sample peer:
//!
//! ```rust,no_run
//! use swarmdb_primitives::peer;
//! use swarmdb_primitives::announce_event::AnnounceEvent;
//! use swarmdb_primitives::{DurationSinceUnixEpoch, NumberOfBytes};
//! use std::net::SocketAddr;
//! use std::net::IpAddr;
//! use std::net::Ipv4Addr;
//!
//! peer::Peer {
//!     peer_id: peer::Id(*b"-qB00000000000000000"),
//!     peer_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080),
//!     updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
//!     uploaded: NumberOfBytes(0),
//!     downloaded: NumberOfBytes(0),
//!     left: NumberOfBytes(0),
//!     event: AnnounceEvent::Started,
//! };
//! ```
use std::net::SocketAddr;

use serde::Serialize;

use crate::announce_event::AnnounceEvent;
use crate::{DurationSinceUnixEpoch, NumberOfBytes};

/// Peer struct used by the swarm database.
///
/// Most of the attributes are obtained from the `announce` request; the
/// `updated` timestamp is stamped by the database when the peer is upserted
/// and drives the inactive-peer eviction in the cleanup sweep.
#[derive(Debug, Clone, Serialize, Copy, PartialEq, Eq, Hash)]
pub struct Peer {
    /// ID used by the downloader peer
    pub peer_id: Id,
    /// The IP and port this peer is listening on
    pub peer_addr: SocketAddr,
    /// The last time the tracker received an announce request from this peer (timestamp)
    #[serde(serialize_with = "ser_unix_time_value")]
    pub updated: DurationSinceUnixEpoch,
    /// The total amount of bytes uploaded by this peer so far
    pub uploaded: NumberOfBytes,
    /// The total amount of bytes downloaded by this peer so far
    pub downloaded: NumberOfBytes,
    /// The number of bytes this peer still has to download
    pub left: NumberOfBytes,
    /// This is an optional key which maps to started, completed, or stopped (or empty, which is the same as not being present).
    pub event: AnnounceEvent,
}

/// Serializes a `DurationSinceUnixEpoch` as a Unix timestamp in milliseconds.
///
/// # Errors
///
/// Will return `serde::Serializer::Error` if unable to serialize the `unix_time_value`.
pub fn ser_unix_time_value<S: serde::Serializer>(unix_time_value: &DurationSinceUnixEpoch, ser: S) -> Result<S::Ok, S::Error> {
    #[allow(clippy::cast_possible_truncation)]
    ser.serialize_u64(unix_time_value.as_millis() as u64)
}

impl Ord for Peer {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.peer_id.cmp(&other.peer_id)
    }
}

impl PartialOrd for Peer {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Peer {
    /// A peer that has nothing left to download and has not announced it has
    /// stopped is serving the full data, also known as a seeder.
    #[must_use]
    pub fn is_seeder(&self) -> bool {
        self.left.0 <= 0 && self.event != AnnounceEvent::Stopped
    }
}

/// Peer ID: the 20 bytes a client chooses to identify itself.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, PartialOrd, Ord)]
pub struct Id(pub [u8; 20]);

impl Id {
    /// The peer ID as a hex string.
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        let mut buffer = [0u8; 40];
        let bytes_out = binascii::bin2hex(&self.0, &mut buffer).expect("failed to hexlify");
        format!("0x{}", std::str::from_utf8(bytes_out).unwrap())
    }

    /// The peer ID as text, if every byte is a printable ASCII character.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        if self.0.iter().all(|b| (b' '..=b'~').contains(b)) {
            return Some(String::from_utf8_lossy(&self.0).to_string());
        }
        None
    }
}

impl std::fmt::Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "{}", self.to_hex_string()),
        }
    }
}

impl Serialize for Id {
    fn serialize<S: serde::Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&self.to_string())
    }
}
