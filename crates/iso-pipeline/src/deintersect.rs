//! Nested rings → disjoint concentric bands.

use geo_types::MultiPolygon;

use iso_core::RingSet;
use iso_geometry::{difference, union_all};

/// Subtract from every ring the union of all smaller rings.
///
/// Walks from the smallest distance outwards keeping a running union of the
/// raw geometries.  The innermost ring is left whole.  Properties and the
/// descending order are preserved.
pub fn deintersect(rings: RingSet) -> RingSet {
    let mut rings = rings.into_inner();
    let mut inner = MultiPolygon(vec![]);

    for ring in rings.iter_mut().rev() {
        let raw = std::mem::replace(&mut ring.geometry, MultiPolygon(vec![]));
        ring.geometry = difference(&raw, &inner);
        inner = union_all([inner, raw]);
    }

    RingSet::from_rings(rings)
}
