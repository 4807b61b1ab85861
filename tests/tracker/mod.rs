use std::sync::Arc;
use std::time::{Duration, Instant};

use swarmdb::core::services::torrent::get_torrent_info;
use swarmdb::core::{AnnounceRequest, ScrapeRequest, TrackerDatabase};
use swarmdb_configuration::{Core, TrackerPolicy};
use swarmdb_primitives::info_hash::ClientInfoHash;
use swarmdb_swarm_index::{Swarm, SwarmHashes};
use tracing::level_filters::LevelFilter;

use crate::common::fixtures::{numbered_peer, sample_info_hash, sample_info_hash_v2};
use crate::common::logging::{tracing_stderr_init, INIT};

fn public_database() -> TrackerDatabase {
    INIT.call_once(|| {
        tracing_stderr_init(LevelFilter::ERROR);
    });

    TrackerDatabase::new(&Core::default())
}

fn register_hybrid_swarm(database: &TrackerDatabase) -> Arc<Swarm> {
    let swarm = Arc::new(Swarm::new(SwarmHashes::Hybrid {
        v1: sample_info_hash(),
        v2: sample_info_hash_v2(),
    }));
    database.add_torrent(&swarm);
    swarm
}

#[test]
fn it_should_serve_a_full_announce_and_scrape_lifecycle_for_a_hybrid_torrent() {
    let database = public_database();
    register_hybrid_swarm(&database);

    // A legacy client and a modern client join the same swarm.
    let legacy_client = numbered_peer(1);
    database
        .announce(&AnnounceRequest::new(ClientInfoHash::V1(sample_info_hash()), legacy_client))
        .unwrap();

    let modern_client = numbered_peer(2);
    let announce_data = database
        .announce(&AnnounceRequest::new(ClientInfoHash::V2(sample_info_hash_v2()), modern_client))
        .unwrap();

    // The modern client is given the legacy client as its peer.
    assert_eq!(announce_data.peers.len(), 1);
    assert_eq!(announce_data.peers[0].peer_id, legacy_client.peer_id);

    // Both aliases scrape the same swarm statistics.
    let scrape_data = database.scrape(&ScrapeRequest::new(vec![
        ClientInfoHash::V1(sample_info_hash()),
        ClientInfoHash::V2(sample_info_hash_v2()),
    ]));

    let by_legacy = scrape_data.files.get(&sample_info_hash()).unwrap();
    let by_modern = scrape_data.files.get(&sample_info_hash_v2().truncated()).unwrap();
    assert_eq!(by_legacy, by_modern);
    assert_eq!(by_legacy.incomplete, 2);

    // Removing the legacy alias keeps the modern alias serving.
    database.remove_torrent(&sample_info_hash());

    assert!(database
        .announce(&AnnounceRequest::new(ClientInfoHash::V1(sample_info_hash()), numbered_peer(3)))
        .is_err());
    assert!(database
        .announce(&AnnounceRequest::new(ClientInfoHash::V2(sample_info_hash_v2()), numbered_peer(3)))
        .is_ok());
}

#[test]
fn concurrent_announces_against_the_same_swarm_should_not_lose_any_registration() {
    let database = Arc::new(public_database());
    register_hybrid_swarm(&database);

    let workers = 8;
    let announces_per_worker = 25;

    let handles: Vec<_> = (0..workers)
        .map(|worker| {
            let database = database.clone();
            std::thread::spawn(move || {
                for i in 0..announces_per_worker {
                    database
                        .announce(&AnnounceRequest::new(
                            ClientInfoHash::V1(sample_info_hash()),
                            numbered_peer(worker * 1000 + i),
                        ))
                        .unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let info = get_torrent_info(&database, &sample_info_hash()).unwrap();

    #[allow(clippy::cast_sign_loss)]
    let expected = (workers * announces_per_worker) as usize;
    assert_eq!(info.peers.unwrap().len(), expected);
}

#[test]
fn requests_in_flight_when_a_handle_is_dropped_should_complete_against_the_shared_state() {
    let database = Arc::new(public_database());
    register_hybrid_swarm(&database);

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let database = database.clone();
            std::thread::spawn(move || {
                for i in 0..100 {
                    database
                        .announce(&AnnounceRequest::new(
                            ClientInfoHash::V1(sample_info_hash()),
                            numbered_peer(worker * 1000 + i),
                        ))
                        .unwrap();
                }
            })
        })
        .collect();

    // The "owning" handle goes away while announces are still running; the
    // workers keep the database alive until they finish, and whichever
    // holder is last also tears down the cleanup worker.
    drop(database);

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn dropping_the_database_should_stop_the_cleanup_worker_without_waiting_out_the_interval() {
    let config = Core {
        inactive_peer_cleanup_interval: 3600,
        ..Default::default()
    };

    let database = TrackerDatabase::new(&config);

    let start = Instant::now();
    drop(database);

    assert!(start.elapsed() < Duration::from_secs(5));
}

#[test]
fn the_background_sweep_should_eventually_prune_a_swarm_whose_peers_expired() {
    let config = Core {
        inactive_peer_cleanup_interval: 1,
        tracker_policy: TrackerPolicy {
            // Every peer is stale as soon as it has announced.
            max_peer_timeout: 0,
            remove_peerless_torrents: true,
        },
        ..Default::default()
    };

    let database = TrackerDatabase::new(&config);
    register_hybrid_swarm(&database);

    database
        .announce(&AnnounceRequest::new(ClientInfoHash::V1(sample_info_hash()), numbered_peer(1)))
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(10);
    while database.scan().find(&sample_info_hash()).is_some() {
        assert!(Instant::now() < deadline, "the sweep did not prune the swarm in time");
        std::thread::sleep(Duration::from_millis(100));
    }

    assert!(database.scan().find(&sample_info_hash_v2().truncated()).is_none());
}
