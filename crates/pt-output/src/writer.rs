//! The `EventWriter` trait implemented by all backend writers.

use crate::{EventRow, OutputResult};

/// Sink for event rows.
///
/// Errors are returned here and stored by
/// [`EventOutputObserver`](crate::EventOutputObserver), since observer
/// callbacks cannot fail.
pub trait EventWriter {
    /// Append one row.
    fn write_event(&mut self, row: &EventRow) -> OutputResult<()>;

    /// Flush all buffered rows.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
