//! Recording report sink for tests.
//!
//! The real gadget nodes only exist on a board with the USB gadget configured,
//! and what reaches the host cannot be observed from test code.
//! [`RecordingSink`] replaces the device write with an in-memory push.  Clones
//! share one log, so a single recorder handed to both sides of a
//! [`DeviceWriter`](crate::application::device_writer::DeviceWriter) captures
//! pointer and consumer frames in their true interleaved order.
//!
//! # Usage in tests
//!
//! ```ignore
//! let recorder = RecordingSink::new();
//! let writer = DeviceWriter::new(Box::new(recorder.clone()), Box::new(recorder.clone()));
//! let mut processor = CommandProcessor::new(writer, ProcessorSettings::default());
//!
//! processor.handle_line(b"MEDIA_NEXT").await;
//!
//! assert_eq!(recorder.frames(), vec![vec![0x02, 0x02], vec![0x02, 0x00]]);
//! ```
//!
//! # Failure injection
//!
//! [`RecordingSink::set_failing`] makes every subsequent write return an
//! error without recording, to exercise the `DEVICE_WRITE_FAILED` paths.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use digitizer_core::ReportId;
use tokio::time::Instant;

use crate::application::device_writer::ReportSink;

/// One captured write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFrame {
    /// Parsed from the first byte; `None` for an unknown ID.
    pub report_id: Option<ReportId>,
    pub bytes: Vec<u8>,
    /// Tokio clock at the time of the write, so paused-time tests can measure holds.
    pub at: Instant,
}

/// A sink that records every frame instead of writing to a device.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    records: Arc<Mutex<Vec<RecordedFrame>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// When `true`, every write fails with `BrokenPipe`.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All captured writes, oldest first.
    pub fn records(&self) -> Vec<RecordedFrame> {
        self.lock().clone()
    }

    /// Just the frame bytes, oldest first.
    pub fn frames(&self) -> Vec<Vec<u8>> {
        self.lock().iter().map(|r| r.bytes.clone()).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<RecordedFrame>> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ReportSink for RecordingSink {
    async fn write_report(&mut self, frame: &[u8]) -> io::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "recording sink set to fail"));
        }
        let report_id = frame
            .first()
            .and_then(|id| ReportId::try_from(*id).ok());
        self.lock().push(RecordedFrame {
            report_id,
            bytes: frame.to_vec(),
            at: Instant::now(),
        });
        Ok(())
    }
}
