use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use swarmdb_primitives::announce_event::AnnounceEvent;
use swarmdb_primitives::{peer, DurationSinceUnixEpoch, NumberOfBytes};

#[allow(dead_code)]
#[must_use]
pub fn a_started_peer(id: i32) -> peer::Peer {
    peer::Peer {
        peer_id: peer_id_from_i32(id),
        peer_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080),
        updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
        uploaded: NumberOfBytes(0),
        downloaded: NumberOfBytes(0),
        left: NumberOfBytes(1),
        event: AnnounceEvent::Started,
    }
}

#[allow(dead_code)]
#[must_use]
pub fn a_completed_peer(id: i32) -> peer::Peer {
    peer::Peer {
        peer_id: peer_id_from_i32(id),
        peer_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(126, 0, 0, 1)), 8080),
        updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
        uploaded: NumberOfBytes(0),
        downloaded: NumberOfBytes(0),
        left: NumberOfBytes(0),
        event: AnnounceEvent::Completed,
    }
}

#[must_use]
pub fn peer_id_from_i32(number: i32) -> peer::Id {
    let bytes = number.to_le_bytes();
    let mut id = [0u8; 20];
    id[16..].copy_from_slice(&bytes);
    peer::Id(id)
}
