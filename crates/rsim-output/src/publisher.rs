//! `TracePublisher<W>` — bridges `StatePublisher` to a `FixWriter`.

use std::path::Path;

use parking_lot::Mutex;
use rsim_engine::{PublishError, PublishedFix, StatePublisher};
use tracing::debug;

use crate::writer::FixWriter;
use crate::{CsvFixWriter, FixRow, OutputError, OutputResult};

struct Inner<W> {
    writer:     W,
    next_seq:   u64,
    last_error: Option<OutputError>,
}

/// A [`StatePublisher`] that appends every fix to a [`FixWriter`] backend.
///
/// A failed write is reported back to the engine (which logs it and keeps
/// going) as `PublishError::Io` for I/O failures and `Rejected` otherwise.
/// The first such error is also kept for
/// [`take_error`][Self::take_error].  Sequence numbers only count rows that
/// were written.
pub struct TracePublisher<W: FixWriter> {
    inner: Mutex<Inner<W>>,
}

impl TracePublisher<CsvFixWriter> {
    /// A CSV trace writing `dir/fixes.csv`.
    pub fn csv(dir: &Path) -> OutputResult<Self> {
        Ok(Self::new(CsvFixWriter::new(dir)?))
    }
}

impl<W: FixWriter> TracePublisher<W> {
    pub fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(Inner { writer, next_seq: 0, last_error: None }),
        }
    }

    /// Rows written so far.
    pub fn rows_written(&self) -> u64 {
        self.inner.lock().next_seq
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&self) -> Option<OutputError> {
        self.inner.lock().last_error.take()
    }

    /// Flush the backend.  Later publishes fail.
    pub fn finish(&self) -> OutputResult<()> {
        let mut inner = self.inner.lock();
        debug!(rows = inner.next_seq, "finishing fix trace");
        inner.writer.finish()
    }

    /// Unwrap the backend (e.g. to inspect it after the run).
    pub fn into_writer(self) -> W {
        self.inner.into_inner().writer
    }
}

impl<W: FixWriter + Send + 'static> StatePublisher for TracePublisher<W> {
    fn publish(&self, fix: &PublishedFix) -> Result<(), PublishError> {
        let mut inner = self.inner.lock();
        let row = FixRow::from_fix(inner.next_seq, fix);
        match inner.writer.write_fix(&row) {
            Ok(()) => {
                inner.next_seq += 1;
                Ok(())
            }
            Err(e) => {
                let reported = match &e {
                    OutputError::Io(io) => PublishError::Io(std::io::Error::new(io.kind(), io.to_string())),
                    other => PublishError::Rejected(other.to_string()),
                };
                if inner.last_error.is_none() {
                    inner.last_error = Some(e);
                }
                Err(reported)
            }
        }
    }
}
