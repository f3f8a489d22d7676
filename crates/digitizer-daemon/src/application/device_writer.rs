//! DeviceWriter: routes encoded frames to the gadget node for their report ID.
//!
//! The writer sits at the application layer and delegates to two
//! [`ReportSink`] trait objects, one per HID collection.  The concrete sinks
//! (gadget device files, in-memory recorders) live in the infrastructure
//! layer.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use digitizer_core::{ReportFrame, ReportId};
use thiserror::Error;
use tracing::{debug, error};

/// Error type for device node operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// A gadget node could not be opened at startup.
    #[error("failed to open device node {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing one frame to its sink failed.
    #[error("{report} report write failed: {source}")]
    Write {
        report: ReportId,
        #[source]
        source: io::Error,
    },
}

/// One destination for encoded report frames.
///
/// A sink receives complete frames (report ID first) and must write each one
/// as a single report.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportSink: Send {
    /// Writes one complete frame.
    async fn write_report(&mut self, frame: &[u8]) -> io::Result<()>;
}

/// Owns the pointer and consumer sinks and writes each frame to the right one.
pub struct DeviceWriter {
    pointer: Box<dyn ReportSink>,
    consumer: Box<dyn ReportSink>,
}

impl DeviceWriter {
    /// Creates a writer over the two sinks.  Both may wrap the same node.
    pub fn new(pointer: Box<dyn ReportSink>, consumer: Box<dyn ReportSink>) -> Self {
        Self { pointer, consumer }
    }

    /// Writes `frame` to the sink selected by its report ID.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Write`] if the sink rejects the frame.
    pub async fn write(&mut self, frame: &ReportFrame) -> Result<(), DeviceError> {
        let report = frame.report_id();
        let sink = match report {
            ReportId::Pointer => &mut self.pointer,
            ReportId::Consumer => &mut self.consumer,
        };

        if let Err(source) = sink.write_report(frame.as_bytes()).await {
            error!(%report, %frame, "device write failed: {source}");
            return Err(DeviceError::Write { report, source });
        }
        debug!(%report, %frame, "wrote report");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
