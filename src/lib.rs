//! The in-memory swarm database at the heart of a `BitTorrent` tracker.
//!
//! It maps torrent info-hashes to live swarm state and answers the two
//! tracker protocol operations, `announce` and `scrape`, under heavy
//! concurrent access from many simultaneous protocol sessions.
//!
//! This library is the domain layer only. Parsing and encoding the wire
//! requests (bencode, UDP datagrams, HTTP query strings), the network
//! listeners and the request dispatch belong to the application embedding
//! it:
//!
//! ```text
//! Delivery layer     Domain layer
//!
//!     HTTP tracker |
//!      UDP tracker |> swarmdb
//! Tracker REST API |
//! ```
//!
//! The entry point is [`core::TrackerDatabase`]. Constructing it starts the
//! background cleanup worker; dropping the last handle signals that worker,
//! joins it and only then releases the index.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use swarmdb::core::{AnnounceRequest, TrackerDatabase};
//! use swarmdb_configuration::Core;
//! use swarmdb_primitives::info_hash::InfoHash;
//! use swarmdb_swarm_index::{Swarm, SwarmHashes};
//!
//! let database = Arc::new(TrackerDatabase::new(&Core::default()));
//!
//! let info_hash: InfoHash = "3b245504cf5f11bbdbe1201cea6a6bf45aee1bc0".parse().unwrap();
//! database.add_torrent(&Arc::new(Swarm::new(SwarmHashes::V1(info_hash))));
//! ```
pub mod core;

/// This code needs to be copied into each crate.
/// Working version, for production.
#[cfg(not(test))]
#[allow(dead_code)]
pub(crate) type CurrentClock = swarmdb_clock::clock::Working;

/// Stopped version, for testing.
#[cfg(test)]
#[allow(dead_code)]
pub(crate) type CurrentClock = swarmdb_clock::clock::Stopped;
