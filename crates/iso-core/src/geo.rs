//! Geographic coordinate type and spherical helpers.
//!
//! `GeoPoint` stores `(lon, lat)` in double precision, the GeoJSON axis
//! order.  Distances are great-circle distances on a sphere of mean Earth
//! radius, and kilometres are the working unit across the workspace: grid
//! spacing, hex size, requested distances and router answers all use km.

use std::fmt;

use geo_types::{Coord, Point, Rect};
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.008_8;

// ── GeoPoint ──────────────────────────────────────────────────────────────────

/// A WGS-84 coordinate in degrees.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    #[inline]
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Haversine great-circle distance in kilometres.
    pub fn distance_km(self, other: GeoPoint) -> f64 {
        let d_lat = (other.lat - self.lat).to_radians();
        let d_lon = (other.lon - self.lon).to_radians();

        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();

        let a = (d_lat * 0.5).sin().powi(2)
            + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);

        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
        EARTH_RADIUS_KM * c
    }

    /// The point reached by travelling `distance_km` along a great circle
    /// starting at `bearing_deg` (0 = north, clockwise).
    pub fn destination(self, distance_km: f64, bearing_deg: f64) -> GeoPoint {
        let lat1 = self.lat.to_radians();
        let lon1 = self.lon.to_radians();
        let bearing = bearing_deg.to_radians();
        let delta = distance_km / EARTH_RADIUS_KM;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
        let lon2 = lon1
            + (bearing.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        GeoPoint::new(lon2.to_degrees(), lat2.to_degrees())
    }

    /// Routing services accept latitudes in [-90, 90] and tolerate longitudes
    /// up to one and a half wraps either way.
    pub fn is_routable(self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-540.0..=540.0).contains(&self.lon)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lon, self.lat)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lon, p.lat)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lon, y: p.lat }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(c: Coord<f64>) -> Self {
        GeoPoint::new(c.x, c.y)
    }
}

// ── BoundingBox ───────────────────────────────────────────────────────────────

/// Axis-aligned lon/lat envelope.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub west:  f64,
    pub south: f64,
    pub east:  f64,
    pub north: f64,
}

impl BoundingBox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self { west, south, east, north }
    }

    /// Envelope of `points`, or `None` if the iterator is empty.
    pub fn from_points<I: IntoIterator<Item = GeoPoint>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = BoundingBox::new(first.lon, first.lat, first.lon, first.lat);
        Some(iter.fold(init, |b, p| BoundingBox {
            west:  b.west.min(p.lon),
            south: b.south.min(p.lat),
            east:  b.east.max(p.lon),
            north: b.north.max(p.lat),
        }))
    }

    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new((self.west + self.east) * 0.5, (self.south + self.north) * 0.5)
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: GeoPoint) -> bool {
        p.lon >= self.west && p.lon <= self.east && p.lat >= self.south && p.lat <= self.north
    }
}

impl From<BoundingBox> for Rect<f64> {
    fn from(b: BoundingBox) -> Self {
        Rect::new(
            Coord { x: b.west, y: b.south },
            Coord { x: b.east, y: b.north },
        )
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(r: Rect<f64>) -> Self {
        BoundingBox::new(r.min().x, r.min().y, r.max().x, r.max().y)
    }
}
