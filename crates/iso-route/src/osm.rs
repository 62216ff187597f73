//! OSM PBF loader — enabled with the `osm` Cargo feature.
//!
//! # Usage
//!
//! ```ignore
//! use std::path::Path;
//! use iso_route::osm::load_from_pbf;
//!
//! let network = load_from_pbf(Path::new("niedersachsen-latest.osm.pbf"))?;
//! ```
//!
//! # What is loaded
//!
//! Every `highway=*` way with at least one usable mode (see
//! [`highway_access`]).  `access`, `motor_vehicle`, `bicycle` and `foot`
//! tags of `no`/`private` strip the matching modes.  One-way ways keep the
//! reverse edge for bicycles and pedestrians only.
//!
//! # Memory note
//!
//! All OSM nodes are buffered in a map during the single read pass because
//! ways reference nodes by id.  The map is dropped before the R-tree is built.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use osmpbf::{Element, ElementReader};

use iso_core::GeoPoint;

use crate::network::{AccessMask, RoadNetwork, RoadNetworkBuilder};
use crate::{NodeId, RouteError};

// ── Public entry point ────────────────────────────────────────────────────────

/// Load a multi-modal road network from an OSM PBF file.
///
/// # Errors
///
/// [`RouteError::Osm`] when the file cannot be opened or parsed.
pub fn load_from_pbf(path: &Path) -> Result<RoadNetwork, RouteError> {
    let reader = ElementReader::from_path(path).map_err(|e| RouteError::Osm(e.to_string()))?;

    let mut all_nodes: HashMap<i64, GeoPoint> = HashMap::new();
    let mut road_ways: Vec<OsmWay> = Vec::new();

    reader
        .for_each(|elem| match elem {
            Element::Node(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lon(), n.lat()));
            }
            Element::DenseNode(n) => {
                all_nodes.insert(n.id(), GeoPoint::new(n.lon(), n.lat()));
            }
            Element::Way(w) => {
                let tags: Vec<(&str, &str)> = w.tags().collect();
                let Some(highway) = tag(&tags, "highway") else {
                    return;
                };
                let access = restrict(highway_access(highway), &tags);
                if access.is_empty() {
                    return;
                }
                road_ways.push(OsmWay {
                    refs:   w.refs().collect(),
                    access,
                    oneway: is_oneway(highway, &tags),
                });
            }
            _ => {}
        })
        .map_err(|e| RouteError::Osm(e.to_string()))?;

    let road_node_ids: HashSet<i64> = road_ways
        .iter()
        .flat_map(|w| w.refs.iter().copied())
        .collect();

    let mut builder = RoadNetworkBuilder::with_capacity(
        road_node_ids.len(),
        road_node_ids.len() * 2,
    );

    let mut osm_to_node: HashMap<i64, NodeId> = HashMap::with_capacity(road_node_ids.len());
    // Sorted so node ids do not depend on hash order.
    let mut ordered: Vec<i64> = road_node_ids.into_iter().collect();
    ordered.sort_unstable();
    for osm_id in ordered {
        if let Some(&pos) = all_nodes.get(&osm_id) {
            osm_to_node.insert(osm_id, builder.add_node(pos));
        }
    }
    drop(all_nodes);

    for way in &road_ways {
        for window in way.refs.windows(2) {
            if let (Some(&from), Some(&to)) = (osm_to_node.get(&window[0]), osm_to_node.get(&window[1])) {
                let len_m = (builder.node_pos(from).distance_km(builder.node_pos(to)) * 1_000.0) as f32;
                builder.add_directed_edge(from, to, len_m, way.access);
                let reverse = if way.oneway { way.access.without(AccessMask::CAR) } else { way.access };
                builder.add_directed_edge(to, from, len_m, reverse);
            }
        }
    }

    Ok(builder.build())
}

// ── Internal types ────────────────────────────────────────────────────────────

struct OsmWay {
    refs:   Vec<i64>,
    access: AccessMask,
    oneway: bool,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

fn tag<'a>(tags: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
    tags.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Modes a `highway` class admits before any access tags are applied.
pub fn highway_access(highway: &str) -> AccessMask {
    match highway {
        "motorway" | "motorway_link" | "trunk" | "trunk_link" => AccessMask::CAR,
        "primary" | "primary_link" | "secondary" | "secondary_link"
        | "tertiary" | "tertiary_link" | "unclassified" | "residential"
        | "living_street" | "service" | "road"                 => AccessMask::ALL,
        "track"                                                => AccessMask::BIKE | AccessMask::FOOT,
        "cycleway"                                             => AccessMask::BIKE | AccessMask::FOOT,
        "footway" | "pedestrian" | "path" | "steps" | "bridleway" => AccessMask::FOOT,
        // Construction, proposed, platforms, raceways...
        _                                                      => AccessMask::NONE,
    }
}

/// Strip modes denied by explicit access tags.
fn restrict(mut access: AccessMask, tags: &[(&str, &str)]) -> AccessMask {
    if access.is_empty() {
        return access;
    }
    let denied = |key: &str| matches!(tag(tags, key), Some("no" | "private"));
    if denied("access") {
        return AccessMask::NONE;
    }
    if denied("motor_vehicle") || denied("motorcar") {
        access = access.without(AccessMask::CAR);
    }
    if denied("bicycle") {
        access = access.without(AccessMask::BIKE);
    }
    if denied("foot") {
        access = access.without(AccessMask::FOOT);
    }
    if matches!(tag(tags, "bicycle"), Some("yes" | "designated")) {
        access = access | AccessMask::BIKE;
    }
    access
}

/// Motorways and roundabouts are implicitly one-way.
fn is_oneway(highway: &str, tags: &[(&str, &str)]) -> bool {
    let explicit = matches!(tag(tags, "oneway"), Some("yes" | "1" | "true"));
    let implicit = matches!(highway, "motorway" | "motorway_link")
        || matches!(tag(tags, "junction"), Some("roundabout"));
    explicit || implicit
}
