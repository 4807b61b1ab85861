//! The concurrent swarm index of the [Swarmdb](https://docs.rs/swarmdb)
//! tracker core.
//!
//! This crate keeps the in-memory mapping from info-hash keys to live
//! swarms:
//!
//! - [`swarm::Swarm`] owns one torrent's peer list and aggregate counters
//!   behind its own mutex.
//! - [`index::SwarmIndex`] stores shared references to swarms in a prefix
//!   tree keyed by raw hash bytes, behind a single shared/exclusive lock.
//!   Modern 32-byte hashes are addressed through their 20-byte truncation,
//!   so a hybrid swarm is reachable under two keys.
//!
//! Locking granularity is deliberately coarse: one `RwLock` over the whole
//! tree. All structural writes serialize against each other and against
//! lookups, while lookups run concurrently with each other. The index
//! operations are kept behind [`index::SwarmIndex`] so a finer-grained
//! structure can replace the tree without changing its callers.
pub mod index;
pub mod swarm;

pub(crate) mod trie;

pub use index::{SwarmIndex, SwarmScan};
pub use swarm::{HashVersion, Swarm, SwarmHashes};

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = swarmdb_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = swarmdb_clock::clock::Stopped;
