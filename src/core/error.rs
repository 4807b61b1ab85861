//! Errors returned by the tracker database.
//!
//! Error | Context | Description
//! ---|---|---
//! `TorrentNotFound` | Announce | The announced info-hash is not registered in the index. Swarms are registered with `add_torrent` only.
//! `TorrentNotWhitelisted` | Authorization | The action cannot be performed on a not-whitelisted torrent (it only applies when the tracker runs in `listed` mode).
//!
//! These are the expected, recoverable faults: they are always surfaced as
//! values inside the response position and never as panics, so a single
//! malformed or unlucky request cannot unwind the serving path. Callers
//! must inspect the result before using the response contents.
use std::panic::Location;

use swarmdb_primitives::info_hash::InfoHash;

/// Recoverable error returned by the tracker database.
#[derive(thiserror::Error, Debug, Clone)]
pub enum Error {
    #[error("torrent not found: {info_hash}, {location}")]
    TorrentNotFound {
        info_hash: InfoHash,
        location: &'static Location<'static>,
    },

    #[error("the torrent: {info_hash}, is not whitelisted, {location}")]
    TorrentNotWhitelisted {
        info_hash: InfoHash,
        location: &'static Location<'static>,
    },
}
