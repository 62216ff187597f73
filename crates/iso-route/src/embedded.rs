//! In-process router: Dijkstra over a [`RoadNetwork`].
//!
//! # Cost units
//!
//! Edge costs are lengths in **centimetres** (u32), so a single edge may be
//! up to ~42 000 km and path sums saturate instead of overflowing.  Results
//! are returned in km.
//!
//! # Shortest-path tree cache
//!
//! A request routes every sample point from the same origin, so the router
//! runs one full one-to-all Dijkstra per `(origin node, profile)` and answers
//! every following query from that tree.  Up to [`TREE_CACHE_CAPACITY`] trees
//! are kept, so concurrent requests from different origins do not evict each
//! other; beyond that the least recently used tree is dropped.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use iso_core::{GeoPoint, RoutingProfile};

use crate::network::{AccessMask, RoadNetwork};
use crate::{NodeId, RouteError, RouteResult, Router};

/// Shortest-path trees kept at once.
pub const TREE_CACHE_CAPACITY: usize = 16;

type TreeKey = (NodeId, RoutingProfile);

struct ShortestPathTree {
    /// Best cost (cm) from the source to each node; `u32::MAX` = unreached.
    dist_cm:   Vec<u32>,
    /// Tick of the most recent lookup, for eviction.
    last_used: AtomicU64,
}

/// Dijkstra router over an owned road network.
pub struct EmbeddedRouter {
    network:     RoadNetwork,
    /// Points farther than this from every node are unroutable.
    max_snap_km: Option<f64>,
    cache:       RwLock<FxHashMap<TreeKey, Arc<ShortestPathTree>>>,
    clock:       AtomicU64,
    trees_built: AtomicUsize,
}

impl EmbeddedRouter {
    pub fn new(network: RoadNetwork) -> Self {
        Self {
            network,
            max_snap_km: None,
            cache:       RwLock::new(FxHashMap::default()),
            clock:       AtomicU64::new(0),
            trees_built: AtomicUsize::new(0),
        }
    }

    /// Reject origins and destinations more than `km` from the network.
    pub fn with_max_snap_km(mut self, km: f64) -> Self {
        self.max_snap_km = Some(km);
        self
    }

    pub fn network(&self) -> &RoadNetwork {
        &self.network
    }

    /// Number of one-to-all Dijkstra runs so far.
    pub fn trees_built(&self) -> usize {
        self.trees_built.load(Ordering::Relaxed)
    }

    /// Synchronous form of [`Router::route`].
    pub fn distance_km(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> RouteResult<f64> {
        let no_route = || RouteError::NoRoute { from: origin, to: destination };

        let src = self.snap(origin)?.ok_or_else(no_route)?;
        let dst = self.snap(destination)?.ok_or_else(no_route)?;

        let tree = self.tree(src, profile);
        match tree.dist_cm[dst.index()] {
            u32::MAX => Err(no_route()),
            cm => Ok(cm as f64 / 100_000.0),
        }
    }

    fn snap(&self, pos: GeoPoint) -> RouteResult<Option<NodeId>> {
        if !pos.is_routable() {
            return Err(RouteError::InvalidCoordinate(pos));
        }
        let Some(node) = self.network.snap_to_node(pos) else {
            return Ok(None);
        };
        if let Some(limit) = self.max_snap_km {
            if pos.distance_km(self.network.node_pos[node.index()]) > limit {
                return Ok(None);
            }
        }
        Ok(Some(node))
    }

    fn tree(&self, source: NodeId, profile: RoutingProfile) -> Arc<ShortestPathTree> {
        let key = (source, profile);
        let tick = self.clock.fetch_add(1, Ordering::Relaxed);

        if let Some(tree) = self.cache.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            tree.last_used.store(tick, Ordering::Relaxed);
            return Arc::clone(tree);
        }

        // Built outside the lock; two racing builders for one key both
        // finish and the second insert wins.
        let tree = Arc::new(ShortestPathTree {
            dist_cm:   shortest_path_tree(&self.network, source, AccessMask::for_profile(profile)),
            last_used: AtomicU64::new(tick),
        });
        self.trees_built.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(
            source = source.0,
            profile = %profile,
            reached = tree.dist_cm.iter().filter(|d| **d != u32::MAX).count(),
            "built shortest-path tree"
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        if cache.len() >= TREE_CACHE_CAPACITY && !cache.contains_key(&key) {
            let oldest = cache
                .iter()
                .min_by_key(|(_, t)| t.last_used.load(Ordering::Relaxed))
                .map(|(k, _)| *k);
            if let Some(oldest) = oldest {
                cache.remove(&oldest);
            }
        }
        cache.insert(key, Arc::clone(&tree));
        tree
    }
}

impl Router for EmbeddedRouter {
    async fn route(
        &self,
        origin: GeoPoint,
        destination: GeoPoint,
        profile: RoutingProfile,
    ) -> RouteResult<f64> {
        self.distance_km(origin, destination, profile)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

#[inline]
fn edge_cost_cm(network: &RoadNetwork, edge: crate::EdgeId) -> u32 {
    (network.edge_length_m[edge.index()] * 100.0).round() as u32
}

/// One-to-all Dijkstra from `source` over edges open to `access`.
fn shortest_path_tree(network: &RoadNetwork, source: NodeId, access: AccessMask) -> Vec<u32> {
    let n = network.node_count();
    let mut dist = vec![u32::MAX; n];
    dist[source.index()] = 0;

    // Min-heap via Reverse; NodeId as secondary key keeps ties deterministic.
    let mut heap: BinaryHeap<Reverse<(u32, NodeId)>> = BinaryHeap::new();
    heap.push(Reverse((0, source)));

    while let Some(Reverse((cost, node))) = heap.pop() {
        if cost > dist[node.index()] {
            continue;
        }
        for edge in network.out_edges(node) {
            if !network.edge_access[edge.index()].allows(access) {
                continue;
            }
            let neighbor = network.edge_to[edge.index()];
            let new_cost = cost.saturating_add(edge_cost_cm(network, edge));
            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }
    dist
}
