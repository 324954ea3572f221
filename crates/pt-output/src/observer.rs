//! `EventOutputObserver<W>` — bridges `TrackObserver` to an `EventWriter`.

use std::cell::RefCell;
use std::rc::Rc;

use pt_track::{Action, TrackObserver, TrackRef};

use crate::row::EventRow;
use crate::writer::EventWriter;
use crate::{OutputError, OutputResult};

/// A [`TrackObserver`] that writes every notification to an
/// [`EventWriter`] backend.
///
/// Errors from the writer are stored internally because `notify` has no
/// return value.  After the run, check for errors with
/// [`take_error`][Self::take_error].
pub struct EventOutputObserver<W: EventWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: EventWriter> EventOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// A shared handle, ready to register on several tracks.
    pub fn shared(writer: W) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new(writer)))
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, reporting a stored write error first.
    pub fn finish(&mut self) -> OutputResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: EventWriter> TrackObserver for EventOutputObserver<W> {
    fn notify(&mut self, track: &TrackRef<'_>, species: &str, action: Action) {
        let row = EventRow::new(track, species, action);
        let result = self.writer.write_event(&row);
        self.store_err(result);
    }
}
