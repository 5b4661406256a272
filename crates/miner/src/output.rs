use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use common::Result;
use normalizer::{CommitRecord, IssueRecord};
use serde::Serialize;
use tracing::debug;

/// A record that serializes to exactly `COLUMNS`, in that order.
pub trait CsvRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

impl CsvRow for CommitRecord {
    const COLUMNS: &'static [&'static str] = CommitRecord::COLUMNS;
}

impl CsvRow for IssueRecord {
    const COLUMNS: &'static [&'static str] = IssueRecord::COLUMNS;
}

/// Writes the header and then one line per row. Absent values become empty
/// cells. Returns the number of data rows.
pub fn write_rows<W: Write, R: CsvRow>(writer: W, rows: &[R]) -> Result<usize> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(R::COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(rows.len())
}

pub fn write_csv<R: CsvRow>(path: &Path, rows: &[R]) -> Result<usize> {
    let file = File::create(path)?;
    let written = write_rows(BufWriter::new(file), rows)?;
    debug!(path = %path.display(), rows = written, "wrote csv");
    Ok(written)
}
