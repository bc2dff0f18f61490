//! The `FixWriter` trait implemented by trace backends.

use crate::{FixRow, OutputResult};

/// A destination for fix rows.
pub trait FixWriter {
    /// Append one row.
    fn write_fix(&mut self, row: &FixRow) -> OutputResult<()>;

    /// Flush and close the underlying file handle.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
