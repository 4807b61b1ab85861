//! Core tracker domain services.
//!
//! There are two services:
//!
//! - [`get_torrent_info`]: it returns all the data about one swarm.
//! - [`get_torrents`]: it returns data about some swarms in bulk excluding the peer lists.
use swarmdb_primitives::info_hash::InfoHash;
use swarmdb_primitives::pagination::Pagination;
use swarmdb_primitives::peer::Peer;

use crate::core::TrackerDatabase;

/// It contains all the information the database has about one swarm
#[derive(Debug, PartialEq)]
pub struct Info {
    /// The 20-byte key of the swarm this data is related to
    pub info_hash: InfoHash,
    /// The total number of seeders for this torrent. Peers that are actively serving a full copy of the torrent data
    pub seeders: u64,
    /// The total number of peers that have ever completed downloading this torrent
    pub completed: u64,
    /// The total number of leechers for this torrent. Peers that are actively downloading this torrent
    pub leechers: u64,
    /// The swarm: the list of peers that are actively trying to download or serving this torrent
    pub peers: Option<Vec<Peer>>,
}

/// It contains only part of the information the database has about one swarm
///
/// It contains the same data as [`Info`] but without the list of peers in the swarm.
#[derive(Debug, PartialEq, Clone)]
pub struct BasicInfo {
    /// The 20-byte key of the swarm this data is related to
    pub info_hash: InfoHash,
    /// The total number of seeders for this torrent. Peers that are actively serving a full copy of the torrent data
    pub seeders: u64,
    /// The total number of peers that have ever completed downloading this torrent
    pub completed: u64,
    /// The total number of leechers for this torrent. Peers that are actively downloading this torrent
    pub leechers: u64,
}

/// It returns all the information the database has about one swarm in an [`Info`] struct.
#[must_use]
pub fn get_torrent_info(database: &TrackerDatabase, info_hash: &InfoHash) -> Option<Info> {
    let swarm = database.scan().find(info_hash)?;

    let stats = swarm.swarm_metadata();
    let peers = swarm.peers(None);

    let peers = Some(peers.iter().map(|peer| (**peer)).collect());

    Some(Info {
        info_hash: *info_hash,
        seeders: u64::from(stats.complete),
        completed: u64::from(stats.downloaded),
        leechers: u64::from(stats.incomplete),
        peers,
    })
}

/// It returns the information the database has about multiple swarms in a [`BasicInfo`] struct, excluding the peer lists.
#[must_use]
pub fn get_torrents(database: &TrackerDatabase, pagination: &Pagination) -> Vec<BasicInfo> {
    let mut basic_infos: Vec<BasicInfo> = vec![];

    for (info_hash, swarm) in database.scan().paginated(Some(pagination)) {
        let stats = swarm.swarm_metadata();

        basic_infos.push(BasicInfo {
            info_hash,
            seeders: u64::from(stats.complete),
            completed: u64::from(stats.downloaded),
            leechers: u64::from(stats.incomplete),
        });
    }

    basic_infos
}
