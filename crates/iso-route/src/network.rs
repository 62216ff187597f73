//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! Edge arrays (`edge_to`, `edge_length_m`, `edge_access`) are sorted by
//! source node and indexed by `EdgeId`.
//!
//! # Access
//!
//! Every directed edge carries an [`AccessMask`] saying which travel modes
//! may use it.  A one-way street is a forward edge open to all its modes
//! plus a reverse edge with only the car bit cleared, so pedestrians and
//! cyclists still walk it both ways.
//!
//! # Spatial index
//!
//! An R-tree (via `rstar`) maps `[lon, lat]` to the nearest `NodeId`.  Used
//! at query time to snap origin and sample points onto the network.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use iso_core::{GeoPoint, RoutingProfile};

use crate::{EdgeId, NodeId};

// ── AccessMask ────────────────────────────────────────────────────────────────

/// Bit set of travel modes allowed on an edge.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct AccessMask(pub u8);

impl AccessMask {
    pub const NONE: AccessMask = AccessMask(0);
    pub const CAR:  AccessMask = AccessMask(1);
    pub const BIKE: AccessMask = AccessMask(2);
    pub const FOOT: AccessMask = AccessMask(4);
    pub const ALL:  AccessMask = AccessMask(1 | 2 | 4);

    /// The single bit a profile needs.  Motorbikes follow car access.
    pub fn for_profile(profile: RoutingProfile) -> AccessMask {
        match profile {
            RoutingProfile::Car | RoutingProfile::Motorbike => AccessMask::CAR,
            RoutingProfile::Bicycle                         => AccessMask::BIKE,
            RoutingProfile::Pedestrian                      => AccessMask::FOOT,
        }
    }

    #[inline]
    pub fn allows(self, other: AccessMask) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    #[inline]
    pub fn without(self, other: AccessMask) -> AccessMask {
        AccessMask(self.0 & !other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for AccessMask {
    type Output = AccessMask;
    fn bitor(self, rhs: AccessMask) -> AccessMask {
        AccessMask(self.0 | rhs.0)
    }
}

// ── R-tree node entry ─────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2], // [lon, lat]
    id: NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance in lon/lat space.  Sufficient for picking
    /// the nearest node; snap gaps are measured with haversine afterwards.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlon = self.point[0] - point[0];
        let dlat = self.point[1] - point[1];
        dlon * dlon + dlat * dlat
    }
}

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Directed road graph in CSR format plus a spatial index for node snapping.
///
/// Do not construct directly; use [`RoadNetworkBuilder`].
pub struct RoadNetwork {
    /// Geographic position of each node.  Indexed by `NodeId`.
    pub node_pos: Vec<GeoPoint>,

    /// CSR row pointer.  Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    /// Destination node of each edge.
    pub edge_to: Vec<NodeId>,

    /// Length of each edge in metres.
    pub edge_length_m: Vec<f32>,

    /// Modes allowed on each edge.
    pub edge_access: Vec<AccessMask>,

    spatial_idx: RTree<NodeEntry>,
}

impl RoadNetwork {
    pub fn empty() -> Self {
        RoadNetworkBuilder::new().build()
    }

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    /// Nearest node to `pos`, or `None` for an empty network.
    pub fn snap_to_node(&self, pos: GeoPoint) -> Option<NodeId> {
        self.spatial_idx
            .nearest_neighbor(&[pos.lon, pos.lat])
            .map(|e| e.id)
    }
}

// ── RoadNetworkBuilder ────────────────────────────────────────────────────────

/// Construct a [`RoadNetwork`] incrementally, then call [`build`](Self::build).
///
/// # Example
///
/// ```
/// use iso_core::GeoPoint;
/// use iso_route::{AccessMask, RoadNetworkBuilder};
///
/// let mut b = RoadNetworkBuilder::new();
/// let a = b.add_node(GeoPoint::new(9.86, 52.37));
/// let c = b.add_node(GeoPoint::new(9.87, 52.37));
/// b.add_road(a, c, 680.0, AccessMask::ALL);
/// let net = b.build();
/// assert_eq!(net.node_count(), 2);
/// assert_eq!(net.edge_count(), 2); // bidirectional
/// ```
pub struct RoadNetworkBuilder {
    nodes:     Vec<GeoPoint>,
    raw_edges: Vec<RawEdge>,
}

struct RawEdge {
    from:     NodeId,
    to:       NodeId,
    length_m: f32,
    access:   AccessMask,
}

impl RoadNetworkBuilder {
    pub fn new() -> Self {
        Self { nodes: Vec::new(), raw_edges: Vec::new() }
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes:     Vec::with_capacity(nodes),
            raw_edges: Vec::with_capacity(edges),
        }
    }

    /// Add a road node and return its `NodeId` (sequential from 0).
    pub fn add_node(&mut self, pos: GeoPoint) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(pos);
        id
    }

    /// Add a **directed** edge.  Edges nobody may use are dropped.
    pub fn add_directed_edge(&mut self, from: NodeId, to: NodeId, length_m: f32, access: AccessMask) {
        if access.is_empty() {
            return;
        }
        self.raw_edges.push(RawEdge { from, to, length_m, access });
    }

    /// Add edges in both directions with the same access.
    pub fn add_road(&mut self, a: NodeId, b: NodeId, length_m: f32, access: AccessMask) {
        self.add_directed_edge(a, b, length_m, access);
        self.add_directed_edge(b, a, length_m, access);
    }

    pub fn node_pos(&self, id: NodeId) -> GeoPoint {
        self.nodes[id.index()]
    }

    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn edge_count(&self) -> usize { self.raw_edges.len() }

    /// Consume the builder and produce a [`RoadNetwork`].
    pub fn build(self) -> RoadNetwork {
        let node_count = self.nodes.len();

        let mut raw = self.raw_edges;
        raw.sort_unstable_by_key(|e| (e.from.0, e.to.0));

        let edge_to:       Vec<NodeId>     = raw.iter().map(|e| e.to).collect();
        let edge_length_m: Vec<f32>        = raw.iter().map(|e| e.length_m).collect();
        let edge_access:   Vec<AccessMask> = raw.iter().map(|e| e.access).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for e in &raw {
            node_out_start[e.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let entries: Vec<NodeEntry> = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, &pos)| NodeEntry {
                point: [pos.lon, pos.lat],
                id: NodeId(i as u32),
            })
            .collect();
        let spatial_idx = RTree::bulk_load(entries);

        RoadNetwork {
            node_pos: self.nodes,
            node_out_start,
            edge_to,
            edge_length_m,
            edge_access,
            spatial_idx,
        }
    }
}

impl Default for RoadNetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
