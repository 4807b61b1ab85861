//! Configuration data structures for the [Swarmdb](https://docs.rs/swarmdb)
//! tracker core.
//!
//! Loading these structures from a file or from the environment is the
//! responsibility of the application embedding the database; this crate only
//! defines the settings the core consumes, with their defaults.
pub mod core;

use serde::{Deserialize, Serialize};

/// The maximum number of returned peers for a torrent.
pub const TORRENT_PEERS_LIMIT: usize = 74;

pub type Core = core::Core;

/// Policy for the cleanup sweep that expires peers and swarms.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, derive_more::Constructor)]
pub struct TrackerPolicy {
    /// Maximum time in seconds since its last announce before a peer is
    /// considered inactive and evicted from its swarm's peer list.
    #[serde(default = "TrackerPolicy::default_max_peer_timeout")]
    pub max_peer_timeout: u32,

    /// If enabled, the cleanup sweep removes the swarms whose peer list has
    /// become empty after evicting their inactive peers.
    #[serde(default = "TrackerPolicy::default_remove_peerless_torrents")]
    pub remove_peerless_torrents: bool,
}

impl Default for TrackerPolicy {
    fn default() -> Self {
        Self {
            max_peer_timeout: Self::default_max_peer_timeout(),
            remove_peerless_torrents: Self::default_remove_peerless_torrents(),
        }
    }
}

impl TrackerPolicy {
    fn default_max_peer_timeout() -> u32 {
        900
    }

    fn default_remove_peerless_torrents() -> bool {
        true
    }
}

/// The intervals the tracker hands back to clients in announce responses.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Copy, derive_more::Constructor)]
pub struct AnnouncePolicy {
    /// The **recommended** number of seconds a client should wait between
    /// regular announce requests.
    #[serde(default = "AnnouncePolicy::default_interval")]
    pub interval: u32,

    /// Minimum announce interval. Clients must not reannounce more frequently
    /// than this.
    #[serde(default = "AnnouncePolicy::default_interval_min")]
    pub interval_min: u32,
}

impl Default for AnnouncePolicy {
    fn default() -> Self {
        Self {
            interval: Self::default_interval(),
            interval_min: Self::default_interval_min(),
        }
    }
}

impl AnnouncePolicy {
    fn default_interval() -> u32 {
        120
    }

    fn default_interval_min() -> u32 {
        120
    }
}
