//! The concurrent swarm index: a prefix tree keyed by raw hash bytes,
//! guarded by one shared/exclusive lock.
//!
//! Every entry pairs a shared swarm reference with the hash version it is
//! keyed under, so a hybrid swarm shows up twice, once per derived key.
//! Both entries point at the same swarm.
//!
//! The single lock is a deliberate scalability ceiling: all structural
//! writes serialize against each other and against lookups, and lookups run
//! concurrently with each other. Hold times are bounded by one tree
//! operation; per-swarm work always happens under the swarm's own lock,
//! after this one has been released.
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use swarmdb_configuration::TrackerPolicy;
use swarmdb_primitives::info_hash::InfoHash;
use swarmdb_primitives::pagination::Pagination;
use swarmdb_primitives::torrent_metrics::TorrentsMetrics;
use swarmdb_primitives::DurationSinceUnixEpoch;

use crate::swarm::{HashVersion, Swarm};
use crate::trie::PrefixTree;

/// One index slot: a shared swarm reference plus the hash version this slot
/// is keyed under.
#[derive(Clone, Debug)]
struct IndexEntry {
    swarm: Arc<Swarm>,
    version: HashVersion,
}

impl IndexEntry {
    /// The 20-byte key this entry is stored under: the legacy hash verbatim,
    /// or the truncation of the modern hash.
    ///
    /// Entries are only ever created for a hash their swarm actually
    /// carries. An entry whose version names a missing hash is corrupted
    /// internal state, not input: the process is terminated rather than
    /// risking to serve corrupted swarm data.
    fn key(&self) -> InfoHash {
        match self.version {
            HashVersion::V1 => match self.swarm.hashes().v1() {
                Some(info_hash) => info_hash,
                None => std::process::abort(),
            },
            HashVersion::V2 => match self.swarm.hashes().v2() {
                Some(info_hash) => info_hash.truncated(),
                None => std::process::abort(),
            },
        }
    }
}

/// The in-memory swarm index.
///
/// Every public function is thread safe. `lookup` returns a strong
/// reference, so the caller can keep using the swarm after the index lock
/// has been released, even if the entry is removed in the meantime.
#[derive(Debug, Default)]
pub struct SwarmIndex {
    swarms: RwLock<PrefixTree<IndexEntry>>,
}

impl SwarmIndex {
    /// It returns the swarm stored under the exact 20-byte key, if any.
    #[must_use]
    pub fn lookup(&self, key: &InfoHash) -> Option<Arc<Swarm>> {
        self.get_swarms().get(&key.0).map(|entry| entry.swarm.clone())
    }

    /// It stores `swarm` under the key derived for `version`.
    ///
    /// Insertion is idempotent per key: if the key is already taken the new
    /// reference is dropped and the pre-existing swarm remains
    /// authoritative. Returns `true` if the entry was inserted.
    pub fn insert(&self, swarm: Arc<Swarm>, version: HashVersion) -> bool {
        let entry = IndexEntry { swarm, version };
        let key = entry.key();

        self.get_swarms_mut().insert(&key.0, entry)
    }

    /// It removes the entry for the exact 20-byte key. Absence of the key is
    /// not an error.
    pub fn remove(&self, key: &InfoHash) -> Option<Arc<Swarm>> {
        self.get_swarms_mut().remove(&key.0).map(|entry| entry.swarm)
    }

    /// It asks every indexed swarm to evict the peers that have not
    /// announced again before `current_cutoff`.
    ///
    /// Runs under the shared lock: the tree is not modified, and each swarm
    /// locks itself for the eviction.
    pub fn remove_inactive_peers(&self, current_cutoff: DurationSinceUnixEpoch) {
        for entry in self.get_swarms().values() {
            entry.swarm.remove_inactive_peers(current_cutoff);
        }
    }

    /// It removes the entries whose swarm has an empty peer list, under the
    /// exclusive lock.
    ///
    /// Both entries of a hybrid swarm become empty together, so both are
    /// removed by the same pass.
    pub fn remove_peerless_swarms(&self, policy: &TrackerPolicy) {
        if !policy.remove_peerless_torrents {
            return;
        }

        self.get_swarms_mut().retain(|entry| !entry.swarm.peers_is_empty());
    }

    /// The number of index entries. A hybrid swarm counts twice, once per
    /// key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.get_swarms().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.get_swarms().is_empty()
    }

    fn get_swarms(&self) -> RwLockReadGuard<'_, PrefixTree<IndexEntry>> {
        self.swarms.read().expect("it should get the read lock")
    }

    fn get_swarms_mut(&self) -> RwLockWriteGuard<'_, PrefixTree<IndexEntry>> {
        self.swarms.write().expect("it should get the write lock")
    }
}

/// Read-only traversal over the index, for the privileged collaborators
/// (statistics reporting, swarm listing, whitelist filtering).
///
/// This is deliberately not part of the general tracker API: there is no
/// safe public iteration primitive, because exposing one would expose the
/// locking discipline. Implementations hold the shared lock for the
/// duration of one traversal and must not call back into anything that
/// blocks.
pub trait SwarmScan: Send + Sync {
    /// Aggregate metrics over all index entries.
    fn metrics(&self) -> TorrentsMetrics;

    /// The index entries in key order, optionally paginated.
    fn paginated(&self, pagination: Option<&Pagination>) -> Vec<(InfoHash, Arc<Swarm>)>;

    /// The swarm stored under the exact key, if any.
    fn find(&self, key: &InfoHash) -> Option<Arc<Swarm>>;
}

impl SwarmScan for SwarmIndex {
    fn metrics(&self) -> TorrentsMetrics {
        let mut metrics = TorrentsMetrics::default();

        for entry in self.get_swarms().values() {
            let stats = entry.swarm.swarm_metadata();
            metrics.seeders += u64::from(stats.complete);
            metrics.completed += u64::from(stats.downloaded);
            metrics.leechers += u64::from(stats.incomplete);
            metrics.torrents += 1;
        }

        metrics
    }

    fn paginated(&self, pagination: Option<&Pagination>) -> Vec<(InfoHash, Arc<Swarm>)> {
        let swarms = self.get_swarms();

        match pagination {
            Some(pagination) => swarms
                .values()
                .skip(pagination.offset as usize)
                .take(pagination.limit as usize)
                .map(|entry| (entry.key(), entry.swarm.clone()))
                .collect(),
            None => swarms.values().map(|entry| (entry.key(), entry.swarm.clone())).collect(),
        }
    }

    fn find(&self, key: &InfoHash) -> Option<Arc<Swarm>> {
        self.lookup(key)
    }
}
