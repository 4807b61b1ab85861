use serde::{Deserialize, Serialize};

use crate::{AnnouncePolicy, TrackerPolicy};

/// Core settings for the swarm database.
#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Core {
    // Announce policy configuration.
    #[serde(default = "Core::default_announce_policy")]
    pub announce_policy: AnnouncePolicy,

    /// Interval in seconds that the cleanup sweep will run to remove inactive
    /// peers from the swarm peer lists.
    #[serde(default = "Core::default_inactive_peer_cleanup_interval")]
    pub inactive_peer_cleanup_interval: u64,

    // When `true` only whitelisted torrents can be announced in the tracker.
    #[serde(default = "Core::default_listed")]
    pub listed: bool,

    // Tracker policy configuration.
    #[serde(default = "Core::default_tracker_policy")]
    pub tracker_policy: TrackerPolicy,
}

impl Default for Core {
    fn default() -> Self {
        Self {
            announce_policy: Self::default_announce_policy(),
            inactive_peer_cleanup_interval: Self::default_inactive_peer_cleanup_interval(),
            listed: Self::default_listed(),
            tracker_policy: Self::default_tracker_policy(),
        }
    }
}

impl Core {
    fn default_announce_policy() -> AnnouncePolicy {
        AnnouncePolicy::default()
    }

    fn default_inactive_peer_cleanup_interval() -> u64 {
        600
    }

    fn default_listed() -> bool {
        false
    }

    fn default_tracker_policy() -> TrackerPolicy {
        TrackerPolicy::default()
    }
}
