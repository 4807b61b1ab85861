//! Statistics services.
//!
//! It includes:
//!
//! - [`get_metrics`]: aggregate metrics for all the swarms in the database.
//!
//! The metrics are calculated on demand from the live index, under its
//! shared lock; nothing is cached.
use swarmdb_primitives::torrent_metrics::TorrentsMetrics;

use crate::core::TrackerDatabase;

/// It returns the [`TorrentsMetrics`] of the whole database.
///
/// A hybrid swarm is indexed under two keys and therefore counted once per
/// key.
#[must_use]
pub fn get_metrics(database: &TrackerDatabase) -> TorrentsMetrics {
    database.scan().metrics()
}
