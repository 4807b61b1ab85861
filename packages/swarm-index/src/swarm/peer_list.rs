use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use swarmdb_primitives::peer;

/// The peers of one swarm, ordered by peer id.
#[derive(Clone, Debug, Default)]
pub struct PeerList {
    peers: BTreeMap<peer::Id, Arc<peer::Peer>>,
}

impl PeerList {
    pub(crate) fn len(&self) -> usize {
        self.peers.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub(crate) fn insert(&mut self, key: peer::Id, value: Arc<peer::Peer>) -> Option<Arc<peer::Peer>> {
        self.peers.insert(key, value)
    }

    pub(crate) fn remove(&mut self, key: &peer::Id) -> Option<Arc<peer::Peer>> {
        self.peers.remove(key)
    }

    pub(crate) fn retain<F>(&mut self, f: F)
    where
        F: FnMut(&peer::Id, &mut Arc<peer::Peer>) -> bool,
    {
        self.peers.retain(f);
    }

    pub(crate) fn seeders_and_leechers(&self) -> (usize, usize) {
        let seeders = self.peers.values().filter(|peer| peer.is_seeder()).count();
        let leechers = self.len() - seeders;

        (seeders, leechers)
    }

    pub(crate) fn get_peers(&self, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        match limit {
            Some(limit) => self.peers.values().take(limit).cloned().collect(),
            None => self.peers.values().cloned().collect(),
        }
    }

    pub(crate) fn get_peers_for_client(&self, client: &SocketAddr, limit: Option<usize>) -> Vec<Arc<peer::Peer>> {
        match limit {
            Some(limit) => self
                .peers
                .values()
                // Take peers which are not the client peer
                .filter(|peer| peer.peer_addr != *client)
                // Limit the number of peers on the result
                .take(limit)
                .cloned()
                .collect(),
            None => self
                .peers
                .values()
                // Take peers which are not the client peer
                .filter(|peer| peer.peer_addr != *client)
                .cloned()
                .collect(),
        }
    }
}
