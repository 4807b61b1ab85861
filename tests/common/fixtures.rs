use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use swarmdb_primitives::announce_event::AnnounceEvent;
use swarmdb_primitives::info_hash::{InfoHash, InfoHashV2};
use swarmdb_primitives::{peer, DurationSinceUnixEpoch, NumberOfBytes};

#[allow(dead_code)]
#[must_use]
pub fn sample_info_hash() -> InfoHash {
    "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse::<InfoHash>().unwrap()
}

#[allow(dead_code)]
#[must_use]
pub fn sample_info_hash_v2() -> InfoHashV2 {
    InfoHashV2([0xabu8; 32])
}

#[allow(dead_code)]
#[must_use]
pub fn numbered_peer(number: i32) -> peer::Peer {
    let bytes = number.to_le_bytes();
    let mut peer_id = [0u8; 20];
    peer_id[16..].copy_from_slice(&bytes);

    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    let host = (number % 250 + 1) as u8;

    peer::Peer {
        peer_id: peer::Id(peer_id),
        peer_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::new(126, 0, 0, host)), 8080),
        updated: DurationSinceUnixEpoch::new(1_669_397_478_934, 0),
        uploaded: NumberOfBytes(0),
        downloaded: NumberOfBytes(0),
        left: NumberOfBytes(1),
        event: AnnounceEvent::Started,
    }
}
