//! The core module contains the generic `BitTorrent` tracker database logic
//! which is independent of the delivery layer.
//!
//! The main struct is [`TrackerDatabase`]. It keeps the swarm index in
//! memory and has four groups of responsibilities:
//!
//! - **Announce**: it registers, updates and removes the announcing peer in
//!   the requested swarm and returns the peer list for that swarm.
//! - **Scrape**: it returns aggregate swarm statistics without mutating any
//!   state.
//! - **Registration**: swarms enter the index through [`TrackerDatabase::add_torrent`]
//!   and leave it through [`TrackerDatabase::remove_torrent`] or the cleanup
//!   sweep. Announcing an unregistered info-hash is an error; the database
//!   never creates swarms implicitly.
//! - **Cleanup**: a background worker periodically evicts peers that have
//!   stopped announcing and prunes the swarms left empty.
//!
//! Every public function is thread safe. The database is meant to be shared
//! behind an [`Arc`]: in-flight operations keep the state they touch alive
//! through shared references, so requests that started before a shutdown
//! complete safely. Dropping the database signals the cleanup worker, joins
//! it, and only then releases the index.
//!
//! ## Announce request
//!
//! A `BitTorrent` swarm is a network of peers that are all trying to
//! download the same torrent. When a peer wants to find other peers it
//! announces itself to the swarm via the tracker. The tracker responds with
//! the list of other peers in the swarm, excluding the requester, limited
//! to [`TORRENT_PEERS_LIMIT`] entries.
//!
//! A torrent can be addressed by a 20-byte legacy info-hash, by a 32-byte
//! modern info-hash, or by both (a "hybrid" torrent). Modern hashes are
//! addressed through their 20-byte truncation, so the legacy key space is
//! the single addressing scheme.
//!
//! Refer to the `BitTorrent` BEPs for the protocol background:
//!
//! - [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html)
//! - [BEP 48. Tracker Protocol Extension: Scrape](https://www.bittorrent.org/beps/bep_0048.html)
//! - [BEP 52. The `BitTorrent` Protocol Specification v2](https://www.bittorrent.org/beps/bep_0052.html)
//!
//! ## Privileged access
//!
//! There is no public primitive to iterate the database, as that would
//! expose its locking discipline. The administrative collaborators
//! (statistics reporting, swarm listing, whitelist filtering) use the
//! narrow read-traversal capability returned by [`TrackerDatabase::scan`]
//! instead.
pub mod error;
pub mod services;
pub mod sweeper;
pub mod whitelist;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;
use std::time::Duration;

use derive_more::Constructor;
use swarmdb_clock::clock::Time;
use swarmdb_configuration::{AnnouncePolicy, Core, TrackerPolicy, TORRENT_PEERS_LIMIT};
use swarmdb_primitives::info_hash::{ClientInfoHash, InfoHash};
use swarmdb_primitives::peer;
use swarmdb_primitives::swarm_metadata::SwarmMetadata;
use swarmdb_swarm_index::{Swarm, SwarmIndex, SwarmScan};
use tracing::debug;

use self::error::Error;
use self::sweeper::CleanupScheduler;
use crate::CurrentClock;

/// The in-memory tracker database.
///
/// Constructing it starts the cleanup worker; dropping it stops the worker
/// deterministically (signal, then join) before the index reference is
/// released.
pub struct TrackerDatabase {
    announce_policy: AnnouncePolicy,
    policy: TrackerPolicy,
    // Declared before `index`: the worker is signalled and joined before
    // this handle's index reference is dropped.
    sweeper: CleanupScheduler,
    index: Arc<SwarmIndex>,
}

/// An `announce` request: the peer as parsed by the delivery layer, plus
/// the info-hash it announces under, in either variant.
#[derive(Clone, Debug, Constructor)]
pub struct AnnounceRequest {
    pub info_hash: ClientInfoHash,
    pub peer: peer::Peer,
}

/// A `scrape` request: zero or more info-hashes. An empty request scrapes
/// every swarm the database knows.
#[derive(Clone, Debug, Default, Constructor)]
pub struct ScrapeRequest {
    pub info_hashes: Vec<ClientInfoHash>,
}

/// Structure that holds the data returned to an `announce` request.
#[derive(Clone, Debug, PartialEq, Constructor)]
pub struct AnnounceData {
    /// The list of peers that are downloading the same torrent.
    /// It excludes the peer that made the request.
    pub peers: Vec<Arc<peer::Peer>>,
    /// Swarm statistics
    pub stats: SwarmMetadata,
    /// The interval the client should wait between announces.
    pub policy: AnnouncePolicy,
}

/// Structure that holds the data returned to a `scrape` request.
///
/// Requested hashes the database does not know are omitted from `files`.
#[derive(Debug, PartialEq, Default)]
pub struct ScrapeData {
    /// A map of 20-byte keys and swarm metadata for each scraped torrent.
    pub files: HashMap<InfoHash, SwarmMetadata>,
}

impl ScrapeData {
    /// Creates a new empty `ScrapeData` with no files (torrents).
    #[must_use]
    pub fn empty() -> Self {
        let files: HashMap<InfoHash, SwarmMetadata> = HashMap::new();
        Self { files }
    }

    /// Adds a torrent to the `ScrapeData`.
    pub fn add_file(&mut self, info_hash: &InfoHash, swarm_metadata: SwarmMetadata) {
        self.files.insert(*info_hash, swarm_metadata);
    }
}

impl TrackerDatabase {
    /// `TrackerDatabase` constructor. It also starts the cleanup worker.
    #[must_use]
    pub fn new(config: &Core) -> TrackerDatabase {
        let index = Arc::new(SwarmIndex::default());

        let sweeper = CleanupScheduler::start(
            Duration::from_secs(config.inactive_peer_cleanup_interval),
            config.tracker_policy.clone(),
            Arc::downgrade(&index),
        );

        Self {
            announce_policy: config.announce_policy,
            policy: config.tracker_policy.clone(),
            sweeper,
            index,
        }
    }

    #[must_use]
    pub fn get_announce_policy(&self) -> AnnouncePolicy {
        self.announce_policy
    }

    /// It handles an announce request.
    ///
    /// The announced info-hash must have been registered with
    /// [`TrackerDatabase::add_torrent`] before; announcing an unknown hash
    /// is the "torrent not found" condition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TorrentNotFound`] if the info-hash does not resolve
    /// to a registered swarm.
    pub fn announce(&self, request: &AnnounceRequest) -> Result<AnnounceData, Error> {
        let key = request.info_hash.index_key();

        let Some(swarm) = self.index.lookup(&key) else {
            debug!("announce for unknown torrent {key}");
            return Err(Error::TorrentNotFound {
                info_hash: key,
                location: Location::caller(),
            });
        };
        // The index lock is already released; the peer update happens under
        // the swarm's own lock.

        let mut peer = request.peer;
        peer.updated = CurrentClock::now();

        let (_, stats) = swarm.upsert_peer_and_get_metadata(&peer);
        let peers = swarm.peers_for_client(&peer.peer_addr, Some(TORRENT_PEERS_LIMIT));

        Ok(AnnounceData {
            peers,
            stats,
            policy: self.announce_policy,
        })
    }

    /// It handles a scrape request. Read-only: neither the index nor any
    /// swarm is mutated.
    ///
    /// Unknown hashes are omitted from the response. A request without
    /// hashes returns the statistics of every known swarm.
    #[must_use]
    pub fn scrape(&self, request: &ScrapeRequest) -> ScrapeData {
        let mut scrape_data = ScrapeData::empty();

        if request.info_hashes.is_empty() {
            for (info_hash, swarm) in self.index.paginated(None) {
                scrape_data.add_file(&info_hash, swarm.swarm_metadata());
            }
            return scrape_data;
        }

        for info_hash in &request.info_hashes {
            let key = info_hash.index_key();

            let Some(swarm) = self.index.lookup(&key) else {
                continue;
            };

            scrape_data.add_file(&key, swarm.swarm_metadata());
        }

        scrape_data
    }

    /// It adds a swarm to the index, under one key per hash it carries: one
    /// for a single-hash swarm, two for a hybrid swarm.
    ///
    /// Insertion is idempotent per key. If a key is already taken the new
    /// reference for that key is dropped and the pre-existing swarm remains
    /// authoritative; for a hybrid swarm this can leave the two slots
    /// pointing at different swarms when they were populated independently.
    pub fn add_torrent(&self, swarm: &Arc<Swarm>) {
        for version in swarm.hashes().versions() {
            self.index.insert(swarm.clone(), version);
        }
    }

    /// It removes the index entry for the given 20-byte key. Exactly one
    /// key: for a hybrid swarm the caller is responsible for removing both
    /// aliases, otherwise the remaining alias keeps the swarm reachable.
    pub fn remove_torrent(&self, info_hash: &InfoHash) {
        drop(self.index.remove(info_hash));
    }

    /// One cleanup pass: evict peers that have been silent for longer than
    /// `max_peer_timeout`, then prune the swarms left empty. The cleanup
    /// worker runs this on every interval; it can also be run on demand.
    pub fn sweep(&self) {
        sweeper::sweep(&self.index, &self.policy);
    }

    /// The read-traversal capability used by the privileged collaborators
    /// (statistics, swarm listing, whitelist filtering).
    ///
    /// Consumers must know the locking discipline: each call holds the
    /// index's shared lock for one traversal, so they must not invoke it
    /// from a context that already blocks the index.
    #[must_use]
    pub fn scan(&self) -> &dyn SwarmScan {
        self.index.as_ref()
    }
}
