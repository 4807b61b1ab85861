use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The event a peer reports in its announce, per
/// [BEP 3. The `BitTorrent` Protocol Specification](https://www.bittorrent.org/beps/bep_0003.html).
///
/// The event drives how the swarm updates its peer list: `Stopped` removes
/// the peer, `Completed` marks a finished download, and a periodic announce
/// carries no event at all.
#[derive(Hash, Clone, Copy, Debug, Display, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum AnnounceEvent {
    /// The peer has started downloading the torrent.
    #[display("started")]
    Started,
    /// The peer has ceased downloading the torrent.
    #[display("stopped")]
    Stopped,
    /// The peer has completed downloading the torrent.
    #[display("completed")]
    Completed,
    /// A regular-interval announcement, with no state change to report.
    #[display("")]
    None,
}
