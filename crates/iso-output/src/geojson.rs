//! GeoJSON `FeatureCollection` output.
//!
//! One feature per ring, in ring order (largest distance first).  A ring
//! with a single part is written as a `Polygon`, anything else as a
//! `MultiPolygon`.  Properties are the ring's merged properties, so
//! `distance` is always present.

use std::io::Write;

use geo_types::{LineString, MultiPolygon, Polygon};
use serde::Serialize;

use iso_core::{Properties, Ring, RingSet};

use crate::OutputResult;

type Position = [f64; 2];

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl From<&MultiPolygon<f64>> for Geometry {
    fn from(mp: &MultiPolygon<f64>) -> Self {
        match mp.0.as_slice() {
            [single] => Geometry::Polygon(polygon_rings(single)),
            parts => Geometry::MultiPolygon(parts.iter().map(polygon_rings).collect()),
        }
    }
}

fn polygon_rings(polygon: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(positions)
        .collect()
}

fn positions(ls: &LineString<f64>) -> Vec<Position> {
    ls.0.iter().map(|c| [c.x, c.y]).collect()
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub struct Feature {
    pub properties: Properties,
    pub geometry:   Geometry,
}

impl From<&Ring> for Feature {
    fn from(ring: &Ring) -> Self {
        Self {
            properties: ring.properties.clone(),
            geometry:   Geometry::from(&ring.geometry),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
#[serde(tag = "type")]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl From<&RingSet> for FeatureCollection {
    fn from(rings: &RingSet) -> Self {
        Self { features: rings.iter().map(Feature::from).collect() }
    }
}

/// Serialise `rings` as a `FeatureCollection` into `writer`.
pub fn write_geojson<W: Write>(mut writer: W, rings: &RingSet) -> OutputResult<()> {
    serde_json::to_writer(&mut writer, &FeatureCollection::from(rings))?;
    writer.flush()?;
    Ok(())
}
