//! CSV output backend.
//!
//! Creates `fixes.csv` in the configured output directory, one row per
//! published fix.  Coordinates keep 7 decimal places (~1 cm).

use std::fs::File;
use std::path::{Path, PathBuf};

use csv::Writer;

use crate::writer::FixWriter;
use crate::{FixRow, OutputError, OutputResult};

/// File name created inside the output directory.
pub const FIXES_FILE: &str = "fixes.csv";

/// Writes fixes to `fixes.csv`.
pub struct CsvFixWriter {
    path:     PathBuf,
    fixes:    Writer<File>,
    finished: bool,
}

impl CsvFixWriter {
    /// Create `dir` if needed, open `dir/fixes.csv`, and write the header.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(FIXES_FILE);
        let mut fixes = Writer::from_path(&path)?;
        fixes.write_record(FixRow::HEADER)?;
        Ok(Self { path, fixes, finished: false })
    }

    /// Path of the trace file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FixWriter for CsvFixWriter {
    fn write_fix(&mut self, row: &FixRow) -> OutputResult<()> {
        if self.finished {
            return Err(OutputError::Finished);
        }
        self.fixes.write_record(&[
            row.seq.to_string(),
            format!("{:.7}", row.lat),
            format!("{:.7}", row.lon),
            format!("{:.1}", row.altitude_m),
            format!("{:.2}", row.speed_mps),
            format!("{:.1}", row.bearing_deg),
            (row.active as u8).to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.fixes.flush()?;
        Ok(())
    }
}
