//! `iso-output` — writers for traced rings and sample grids.
//!
//! | Module      | Output                                                  |
//! |-------------|---------------------------------------------------------|
//! | [`geojson`] | `FeatureCollection` of ring polygons, largest first      |
//! | [`csv`]     | Annotated sample grid, `lon,lat,distance_km` per point   |
//!
//! # Usage
//!
//! ```rust,ignore
//! use iso_output::{write_geojson, GridCsvWriter};
//!
//! let (rings, grid) = isodist.compute_with_grid(origin, &d, &meta, &mut obs).await?;
//! write_geojson(std::io::stdout().lock(), &rings)?;
//! GridCsvWriter::create(Path::new("grid.csv"))?.write_grid(&grid)?;
//! ```

pub mod csv;
pub mod error;
pub mod geojson;


pub use csv::GridCsvWriter;
pub use error::{OutputError, OutputResult};
pub use geojson::{write_geojson, Feature, FeatureCollection, Geometry};
