//! Lock-free hand-off of frame reports to another thread.
//!
//! The scheduler writes each [`FrameReport`] into a triple buffer; a
//! [`SnapshotReader`] on any thread always sees the latest complete frame
//! and never blocks the writer.

use super::render::FrameReport;

/// Writer side, owned by the scheduler.
pub(crate) struct SnapshotPublisher {
    input: triple_buffer::Input<Option<FrameReport>>,
}

impl SnapshotPublisher {
    pub(crate) fn new() -> (Self, SnapshotReader) {
        let (input, output) = triple_buffer::triple_buffer(&None);
        (Self { input }, SnapshotReader { output })
    }

    pub(crate) fn publish(&mut self, report: FrameReport) {
        self.input.write(Some(report));
    }
}

impl std::fmt::Debug for SnapshotPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotPublisher").finish_non_exhaustive()
    }
}

/// Reader side. `Send`, so it can move to a UI or logging thread.
pub struct SnapshotReader {
    output: triple_buffer::Output<Option<FrameReport>>,
}

impl SnapshotReader {
    /// Most recent published frame, if any frame has run.
    pub fn latest(&mut self) -> Option<&FrameReport> {
        self.output.read().as_ref()
    }
}

impl std::fmt::Debug for SnapshotReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotReader").finish_non_exhaustive()
    }
}
