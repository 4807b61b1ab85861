//! Primitive types for [Swarmdb](https://docs.rs/swarmdb).
//!
//! This crate contains the basic data structures for the in-memory swarm
//! database: info-hashes in their legacy (20-byte) and modern (32-byte)
//! variants, the peer struct kept for every announcing client, and the
//! aggregate statistics returned by `scrape` requests and by the
//! administrative services.
use std::time::Duration;

pub mod announce_event;
pub mod info_hash;
pub mod pagination;
pub mod peer;
pub mod swarm_metadata;
pub mod torrent_metrics;

/// Duration since the Unix Epoch.
pub type DurationSinceUnixEpoch = Duration;

/// Number of bytes a peer reports as uploaded, downloaded or left.
///
/// Negative values can be reported by buggy clients; they are stored
/// verbatim and treated as "nothing left" by the seeder check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NumberOfBytes(pub i64);
