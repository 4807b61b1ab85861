//! The swarm entity: one torrent's peer set and aggregate counters.
//!
//! A swarm is shared between the index, the cleanup sweep and every request
//! that looked it up, so all of its state lives behind its own mutex. Peer
//! contention on one swarm never delays operations on another swarm or on
//! the index itself.
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use swarmdb_primitives::announce_event::AnnounceEvent;
use swarmdb_primitives::info_hash::{InfoHash, InfoHashV2};
use swarmdb_primitives::swarm_metadata::SwarmMetadata;
use swarmdb_primitives::{peer, DurationSinceUnixEpoch};

pub mod peer_list;

use peer_list::PeerList;

/// Which hash variant an index entry is keyed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HashVersion {
    V1,
    V2,
}

/// The info-hashes a swarm is addressable by.
///
/// A hybrid torrent publishes both variants for the same content, so its
/// swarm carries both hashes and ends up with two index entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwarmHashes {
    V1(InfoHash),
    V2(InfoHashV2),
    Hybrid { v1: InfoHash, v2: InfoHashV2 },
}

impl SwarmHashes {
    #[must_use]
    pub fn v1(&self) -> Option<InfoHash> {
        match self {
            SwarmHashes::V1(info_hash) | SwarmHashes::Hybrid { v1: info_hash, .. } => Some(*info_hash),
            SwarmHashes::V2(_) => None,
        }
    }

    #[must_use]
    pub fn v2(&self) -> Option<InfoHashV2> {
        match self {
            SwarmHashes::V2(info_hash) | SwarmHashes::Hybrid { v2: info_hash, .. } => Some(*info_hash),
            SwarmHashes::V1(_) => None,
        }
    }

    /// The hash versions this swarm carries, one index entry each.
    #[must_use]
    pub fn versions(&self) -> Vec<HashVersion> {
        match self {
            SwarmHashes::V1(_) => vec![HashVersion::V1],
            SwarmHashes::V2(_) => vec![HashVersion::V2],
            SwarmHashes::Hybrid { .. } => vec![HashVersion::V1, HashVersion::V2],
        }
    }
}

/// A swarm: the set of peers trying to download the same torrent, plus the
/// counter of peers that ever completed the download.
///
/// All methods are thread safe. The hash identity is immutable; the mutable
/// state is guarded by the swarm's own lock, which is never held across a
/// call into the index.
#[derive(Debug)]
pub struct Swarm {
    hashes: SwarmHashes,
    state: Mutex<SwarmState>,
}

#[derive(Debug, Default)]
struct SwarmState {
    peers: PeerList,
    downloaded: u32,
}

impl Swarm {
    #[must_use]
    pub fn new(hashes: SwarmHashes) -> Self {
        Self {
            hashes,
            state: Mutex::new(SwarmState::default()),
        }
    }

    #[must_use]
    pub fn hashes(&self) -> &SwarmHashes {
        &self.hashes
    }

    /// It inserts, updates or removes the announcing peer, and returns true
    /// if the number of complete downloads has increased.
    ///
    /// A peer announcing the `stopped` event is removed. A peer announcing
    /// `completed` only increases the `downloaded` counter if it was already
    /// known and not yet counted as completed.
    pub fn upsert_peer(&self, peer: &peer::Peer) -> bool {
        let mut state = self.lock_state();
        let mut downloads_increased: bool = false;

        match peer.event {
            AnnounceEvent::Stopped => {
                drop(state.peers.remove(&peer.peer_id));
            }
            AnnounceEvent::Completed => {
                let previous = state.peers.insert(peer.peer_id, Arc::new(*peer));
                // Don't count if the peer was not previously known or had
                // already announced it completed.
                if previous.is_some_and(|p| p.event != AnnounceEvent::Completed) {
                    state.downloaded += 1;
                    downloads_increased = true;
                }
            }
            _ => {
                drop(state.peers.insert(peer.peer_id, Arc::new(*peer)));
            }
        }

        downloads_increased
    }

    /// Like [`Swarm::upsert_peer`], also returning the swarm metadata as it
    /// stands right after the update.
    pub fn upsert_peer_and_get_metadata(&self, peer: &peer::Peer) -> (bool, SwarmMetadata) {
        let changed = self.upsert_peer(peer);
        let metadata = self.swarm_metadata();
        (changed, metadata)
    }

    /// It returns the swarm statistics for a `scrape` response.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn swarm_metadata(&self) -> SwarmMetadata {
        let state = self.lock_state();
        let (seeders, leechers) = state.peers.seeders_and_leechers();

        SwarmMetadata {
            downloaded: state.downloaded,
            complete: seeders as u32,
            incomplete: leechers as u32,
        }
    }

    /// Get all swarm peers, optionally limiting the result.
    #[must_use]
    pub fn peers(&self, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        self.lock_state().peers.get_peers(limit)
    }

    /// It returns the list of peers for a given client, optionally limiting
    /// the result.
    ///
    /// It filters out the client itself, because the list is meant to be
    /// returned to that client.
    #[must_use]
    pub fn peers_for_client(&self, client: &SocketAddr, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        self.lock_state().peers.get_peers_for_client(client, limit)
    }

    #[must_use]
    pub fn peers_is_empty(&self) -> bool {
        self.lock_state().peers.is_empty()
    }

    #[must_use]
    pub fn peers_len(&self) -> usize {
        self.lock_state().peers.len()
    }

    /// It removes the peers that have not announced again before
    /// `current_cutoff`.
    pub fn remove_inactive_peers(&self, current_cutoff: DurationSinceUnixEpoch) {
        self.lock_state().peers.retain(|_, peer| peer.updated > current_cutoff);
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SwarmState> {
        self.state.lock().expect("it should get the swarm lock")
    }
}
