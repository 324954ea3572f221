//! CSV output backend.
//!
//! One row per notification, header `time,track,track_name,species,action`.
//! `track` is the numeric track id and `action` is the notification's wire
//! name (`free_promoter` or `terminate`).

use std::fs::File;
use std::io;
use std::path::Path;

use csv::Writer;

use crate::writer::EventWriter;
use crate::{EventRow, OutputError, OutputResult};

const HEADER: [&str; 5] = ["time", "track", "track_name", "species", "action"];

/// Writes event rows as CSV to any [`io::Write`] sink, a file by default.
pub struct CsvEventWriter<W: io::Write = File> {
    inner:    Writer<W>,
    rows:     u64,
    finished: bool,
}

impl CsvEventWriter<File> {
    /// Create (or truncate) `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        Self::with_writer(Writer::from_path(path)?)
    }
}

impl<W: io::Write> CsvEventWriter<W> {
    /// Write CSV to `sink`, header first.
    pub fn from_writer(sink: W) -> OutputResult<Self> {
        Self::with_writer(Writer::from_writer(sink))
    }

    fn with_writer(mut inner: Writer<W>) -> OutputResult<Self> {
        inner.write_record(HEADER)?;
        Ok(Self { inner, rows: 0, finished: false })
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying sink.
    pub fn into_inner(self) -> OutputResult<W> {
        self.inner
            .into_inner()
            .map_err(|e| OutputError::Io(e.into_error()))
    }
}

impl<W: io::Write> EventWriter for CsvEventWriter<W> {
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()> {
        self.inner.write_record(&[
            row.time.as_f64().to_string(),
            row.track.0.to_string(),
            row.track_name.clone(),
            row.species.clone(),
            row.action.as_str().to_owned(),
        ])?;
        self.rows += 1;
        self.finished = false;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.inner.flush()?;
        Ok(())
    }
}
