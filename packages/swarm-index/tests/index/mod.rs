use std::sync::Arc;
use std::time::Duration;

use rstest::{fixture, rstest};
use swarmdb_configuration::TrackerPolicy;
use swarmdb_primitives::info_hash::{InfoHash, InfoHashV2};
use swarmdb_primitives::pagination::Pagination;
use swarmdb_swarm_index::{Swarm, SwarmHashes, SwarmIndex, SwarmScan};

use crate::common::peer_builder::{a_completed_peer, a_started_peer};

fn legacy_hash(seed: u8) -> InfoHash {
    InfoHash([seed; 20])
}

fn modern_hash(seed: u8) -> InfoHashV2 {
    InfoHashV2([seed; 32])
}

#[fixture]
fn index() -> SwarmIndex {
    SwarmIndex::default()
}

#[fixture]
fn hybrid_swarm() -> Arc<Swarm> {
    Arc::new(Swarm::new(SwarmHashes::Hybrid {
        v1: legacy_hash(1),
        v2: modern_hash(2),
    }))
}

fn register(index: &SwarmIndex, swarm: &Arc<Swarm>) {
    for version in swarm.hashes().versions() {
        index.insert(swarm.clone(), version);
    }
}

#[rstest]
fn a_legacy_only_swarm_is_reachable_by_its_legacy_key_and_nothing_else(index: SwarmIndex) {
    let swarm = Arc::new(Swarm::new(SwarmHashes::V1(legacy_hash(1))));

    register(&index, &swarm);

    assert!(index.lookup(&legacy_hash(1)).is_some());
    assert!(index.lookup(&legacy_hash(2)).is_none());
    assert_eq!(index.len(), 1);
}

#[rstest]
fn a_hybrid_swarm_is_reachable_by_both_of_its_keys(index: SwarmIndex, hybrid_swarm: Arc<Swarm>) {
    register(&index, &hybrid_swarm);

    let by_legacy = index.lookup(&legacy_hash(1)).unwrap();
    let by_modern = index.lookup(&modern_hash(2).truncated()).unwrap();

    assert!(Arc::ptr_eq(&by_legacy, &by_modern));
    assert_eq!(index.len(), 2);
}

#[rstest]
fn removing_one_alias_of_a_hybrid_swarm_leaves_the_other_alias_reachable(index: SwarmIndex, hybrid_swarm: Arc<Swarm>) {
    register(&index, &hybrid_swarm);

    index.remove(&legacy_hash(1));

    assert!(index.lookup(&legacy_hash(1)).is_none());
    assert!(index.lookup(&modern_hash(2).truncated()).is_some());
}

#[rstest]
fn two_swarms_may_end_up_behind_the_two_aliases_when_slots_were_taken_independently(index: SwarmIndex) {
    // A v2-only swarm takes the truncated slot first.
    let squatter = Arc::new(Swarm::new(SwarmHashes::V2(modern_hash(2))));
    register(&index, &squatter);

    // The hybrid swarm later claims both of its keys; only the free one is taken.
    let hybrid = Arc::new(Swarm::new(SwarmHashes::Hybrid {
        v1: legacy_hash(1),
        v2: modern_hash(2),
    }));
    register(&index, &hybrid);

    let by_legacy = index.lookup(&legacy_hash(1)).unwrap();
    let by_modern = index.lookup(&modern_hash(2).truncated()).unwrap();

    assert!(Arc::ptr_eq(&by_legacy, &hybrid));
    assert!(Arc::ptr_eq(&by_modern, &squatter));
}

#[rstest]
fn evicting_inactive_peers_and_pruning_makes_an_emptied_swarm_unreachable(index: SwarmIndex, hybrid_swarm: Arc<Swarm>) {
    register(&index, &hybrid_swarm);

    let peer = a_started_peer(1);
    hybrid_swarm.upsert_peer(&peer);

    // Cut off one second after the peer was last seen.
    index.remove_inactive_peers(peer.updated + Duration::from_secs(1));
    index.remove_peerless_swarms(&TrackerPolicy::default());

    assert!(index.lookup(&legacy_hash(1)).is_none());
    assert!(index.lookup(&modern_hash(2).truncated()).is_none());
    assert!(index.is_empty());
}

#[rstest]
fn pruning_is_disabled_by_policy(index: SwarmIndex, hybrid_swarm: Arc<Swarm>) {
    register(&index, &hybrid_swarm);

    index.remove_peerless_swarms(&TrackerPolicy {
        remove_peerless_torrents: false,
        ..Default::default()
    });

    assert_eq!(index.len(), 2);
}

#[rstest]
fn a_reference_held_before_a_sweep_stays_usable_after_the_sweep_removed_the_swarm(index: SwarmIndex) {
    let swarm = Arc::new(Swarm::new(SwarmHashes::V1(legacy_hash(1))));
    register(&index, &swarm);

    let held = index.lookup(&legacy_hash(1)).unwrap();

    index.remove_inactive_peers(Duration::from_secs(1));
    index.remove_peerless_swarms(&TrackerPolicy::default());

    assert!(index.lookup(&legacy_hash(1)).is_none());

    // The in-flight holder can still operate on the swarm.
    held.upsert_peer(&a_started_peer(1));
    assert_eq!(held.peers_len(), 1);
}

#[rstest]
fn metrics_aggregate_over_every_index_entry(index: SwarmIndex) {
    let seeded = Arc::new(Swarm::new(SwarmHashes::V1(legacy_hash(1))));
    seeded.upsert_peer(&a_started_peer(1));
    seeded.upsert_peer(&a_completed_peer(1));
    register(&index, &seeded);

    let leeching = Arc::new(Swarm::new(SwarmHashes::V1(legacy_hash(2))));
    leeching.upsert_peer(&a_started_peer(2));
    register(&index, &leeching);

    let metrics = index.metrics();

    assert_eq!(metrics.torrents, 2);
    assert_eq!(metrics.seeders, 1);
    assert_eq!(metrics.leechers, 1);
    assert_eq!(metrics.completed, 1);
}

#[rstest]
fn the_paginated_listing_is_ordered_by_key_bytes(index: SwarmIndex) {
    for seed in [3u8, 1, 2] {
        register(&index, &Arc::new(Swarm::new(SwarmHashes::V1(legacy_hash(seed)))));
    }

    let all: Vec<InfoHash> = index.paginated(None).into_iter().map(|(key, _)| key).collect();
    assert_eq!(all, vec![legacy_hash(1), legacy_hash(2), legacy_hash(3)]);

    let second_page: Vec<InfoHash> = index
        .paginated(Some(&Pagination { offset: 1, limit: 1 }))
        .into_iter()
        .map(|(key, _)| key)
        .collect();
    assert_eq!(second_page, vec![legacy_hash(2)]);
}

#[rstest]
fn the_capability_finds_a_swarm_by_its_exact_key(index: SwarmIndex, hybrid_swarm: Arc<Swarm>) {
    register(&index, &hybrid_swarm);

    assert!(index.find(&legacy_hash(1)).is_some());
    assert!(index.find(&modern_hash(2).truncated()).is_some());
    assert!(index.find(&legacy_hash(9)).is_none());
}

#[rstest]
fn concurrent_peer_registrations_on_the_same_swarm_never_lose_an_update() {
    let index = Arc::new(SwarmIndex::default());
    let swarm = Arc::new(Swarm::new(SwarmHashes::V1(legacy_hash(1))));
    register(&index, &swarm);

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let index = index.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    let swarm = index.lookup(&InfoHash([1u8; 20])).unwrap();
                    swarm.upsert_peer(&a_started_peer(worker * 100 + i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(swarm.peers_len(), 8 * 25);
}
