//! CSV export of an annotated sample grid.
//!
//! Columns: `lon,lat,distance_km`.  Unreachable points and points never
//! annotated leave `distance_km` empty.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use iso_pipeline::SampleGrid;

use crate::OutputResult;

const HEADER: [&str; 3] = ["lon", "lat", "distance_km"];

pub struct GridCsvWriter<W: Write> {
    writer:   Writer<W>,
    finished: bool,
}

impl GridCsvWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        Self::from_writer(File::create(path)?)
    }
}

impl<W: Write> GridCsvWriter<W> {
    pub fn from_writer(inner: W) -> OutputResult<Self> {
        let mut writer = Writer::from_writer(inner);
        writer.write_record(HEADER)?;
        Ok(Self { writer, finished: false })
    }

    /// Append one row per grid point, in grid order.
    pub fn write_grid(&mut self, grid: &SampleGrid) -> OutputResult<()> {
        for p in grid.points() {
            let distance = match p.distance {
                Some(d) if d.is_finite() => d.to_string(),
                _ => String::new(),
            };
            self.writer.write_record(&[p.point.lon.to_string(), p.point.lat.to_string(), distance])?;
        }
        Ok(())
    }

    /// Flush the underlying writer.  Idempotent.
    pub fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.writer.flush()?;
        Ok(())
    }
}
