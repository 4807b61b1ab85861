/// Aggregate metrics for all the swarms in the database.
///
/// A hybrid swarm is indexed under two keys and contributes to the totals
/// once per key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct TorrentsMetrics {
    /// Total number of seeders for all torrents
    pub seeders: u64,
    /// Total number of peers that have ever completed downloading, for all torrents
    pub completed: u64,
    /// Total number of leechers for all torrents
    pub leechers: u64,
    /// Total number of torrents
    pub torrents: u64,
}
