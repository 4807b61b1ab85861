//! The production clock: a thin wrapper over the system time.
use std::time::SystemTime;

use swarmdb_primitives::DurationSinceUnixEpoch;

use crate::clock;

#[allow(clippy::module_name_repetitions)]
pub struct WorkingClock;

impl clock::Time for clock::Working {
    /// # Panics
    ///
    /// Panics if the system time is set before the Unix Epoch.
    fn now() -> DurationSinceUnixEpoch {
        SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap()
    }
}
