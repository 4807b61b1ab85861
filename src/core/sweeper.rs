//! The cleanup scheduler: a background worker that periodically sweeps the
//! index to expire stale peers and prune empty swarms.
//!
//! **Inactive peers** are peers that have not announced again for more than
//! `max_peer_timeout` seconds. A swarm whose peer list becomes empty is
//! removed from the index when the `remove_peerless_torrents` policy is
//! enabled.
//!
//! The worker holds only a weak reference to the index, so it can never
//! keep the database alive on its own. Stopping is a one-shot signal:
//! dropping the [`CleanupScheduler`] sends it and joins the thread, which
//! terminates within one sweep interval plus the cost of a sweep already in
//! progress.
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Weak;
use std::thread;
use std::time::Duration;

use swarmdb_clock::clock::Time;
use swarmdb_configuration::TrackerPolicy;
use swarmdb_swarm_index::SwarmIndex;
use tracing::{debug, error, info};

use crate::CurrentClock;

/// Handle to the background cleanup worker.
#[derive(Debug)]
pub(crate) struct CleanupScheduler {
    stop: Option<mpsc::Sender<()>>,
    handle: Option<thread::JoinHandle<()>>,
}

impl CleanupScheduler {
    /// It spawns the worker. One sweep runs per elapsed `interval` until
    /// the stop signal is observed.
    pub(crate) fn start(interval: Duration, policy: TrackerPolicy, index: Weak<SwarmIndex>) -> Self {
        let (stop, stopped) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("swarm-cleanup".to_owned())
            .spawn(move || run(interval, &policy, &index, &stopped))
            .expect("it should spawn the cleanup worker");

        Self {
            stop: Some(stop),
            handle: Some(handle),
        }
    }
}

impl Drop for CleanupScheduler {
    fn drop(&mut self) {
        if let Some(stop) = self.stop.take() {
            // A send failure means the worker already exited; joining still works.
            drop(stop.send(()));
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("the cleanup worker panicked");
            }
        }
    }
}

fn run(interval: Duration, policy: &TrackerPolicy, index: &Weak<SwarmIndex>, stopped: &mpsc::Receiver<()>) {
    info!("cleanup worker started, sweeping every {} seconds", interval.as_secs());

    loop {
        match stopped.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                let Some(index) = index.upgrade() else {
                    break;
                };
                sweep(&index, policy);
            }
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    info!("cleanup worker stopped");
}

/// One sweep: evict the peers not seen within `max_peer_timeout`, then
/// prune the swarms whose peer list became empty.
///
/// The eviction traversal holds the index's shared lock while each swarm
/// locks itself; only the pruning takes the exclusive lock, so the
/// exclusive hold time is bounded by the number of entries.
pub(crate) fn sweep(index: &SwarmIndex, policy: &TrackerPolicy) {
    let current_cutoff = CurrentClock::now_sub(&Duration::from_secs(u64::from(policy.max_peer_timeout))).unwrap_or_default();

    index.remove_inactive_peers(current_cutoff);
    index.remove_peerless_swarms(policy);

    debug!("swept the swarm index, {} entries remain", index.len());
}
