//! Torrent whitelist: hash-based access control for trackers running in
//! `listed` mode.
//!
//! The whitelist is one of the privileged collaborators of the database:
//! besides answering `authorize` checks for the delivery layer, it can
//! purge the index of swarms that are no longer listed, using the
//! read-traversal capability and `remove_torrent`.
use std::collections::HashSet;
use std::panic::Location;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use swarmdb_primitives::info_hash::InfoHash;
use tracing::info;

use crate::core::error::Error;
use crate::core::TrackerDatabase;

/// An in-memory set of whitelisted 20-byte info-hash keys.
///
/// All methods are thread safe. Hybrid torrents must be listed under both
/// of their keys, the same way they are indexed.
#[derive(Debug, Default)]
pub struct WhiteList {
    info_hashes: RwLock<HashSet<InfoHash>>,
}

impl WhiteList {
    /// It adds a torrent to the whitelist. Returns `true` if it was not
    /// already listed.
    #[allow(clippy::must_use_candidate)]
    pub fn add(&self, info_hash: &InfoHash) -> bool {
        self.get_info_hashes_mut().insert(*info_hash)
    }

    /// It removes a torrent from the whitelist. Returns `true` if it was
    /// listed.
    #[allow(clippy::must_use_candidate)]
    pub fn remove(&self, info_hash: &InfoHash) -> bool {
        self.get_info_hashes_mut().remove(info_hash)
    }

    #[must_use]
    pub fn contains(&self, info_hash: &InfoHash) -> bool {
        self.get_info_hashes().contains(info_hash)
    }

    /// It checks whether an operation on a torrent is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TorrentNotWhitelisted`] if the info-hash is not on
    /// the list.
    pub fn authorize(&self, info_hash: &InfoHash) -> Result<(), Error> {
        if self.contains(info_hash) {
            return Ok(());
        }

        Err(Error::TorrentNotWhitelisted {
            info_hash: *info_hash,
            location: Location::caller(),
        })
    }

    /// It removes from the database every swarm entry whose key is not on
    /// the whitelist.
    ///
    /// The traversal takes a snapshot of the keys first, so the index's
    /// shared lock is not held across the removals.
    pub fn purge_unlisted(&self, database: &TrackerDatabase) {
        let mut purged = 0u64;

        for (info_hash, _) in database.scan().paginated(None) {
            if !self.contains(&info_hash) {
                database.remove_torrent(&info_hash);
                purged += 1;
            }
        }

        if purged > 0 {
            info!("purged {purged} swarm entries not on the whitelist");
        }
    }

    fn get_info_hashes(&self) -> RwLockReadGuard<'_, HashSet<InfoHash>> {
        self.info_hashes.read().expect("it should get the read lock")
    }

    fn get_info_hashes_mut(&self) -> RwLockWriteGuard<'_, HashSet<InfoHash>> {
        self.info_hashes.write().expect("it should get the write lock")
    }
}
