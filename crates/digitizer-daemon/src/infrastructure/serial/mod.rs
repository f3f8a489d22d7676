//! Serial command transport (`/dev/ttyGS0`, the USB CDC ACM gadget port).
//!
//! [`SerialSupervisor`] keeps a command session running for the life of the
//! process: it opens the port, runs the command loop over it, and when the
//! session ends (host closed the port, read error, cable pulled) waits the
//! reconnect delay and opens it again.  The [`CommandProcessor`] is borrowed
//! across sessions, so the pointer state survives reconnects.
//!
//! # Lifecycle
//!
//! ```text
//!   open ──ok──▶ run_command_loop ──EOF / I/O error──▶ wait delay ──▶ open
//!    │                  │
//!    └─err─▶ wait delay  └─shutdown──▶ return
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::io::BufReader;
use tokio::sync::watch;
use tokio::time;
use tokio_serial::{DataBits, FlowControl, Parity, SerialPortBuilderExt, SerialStream, StopBits};
use tracing::{error, info, warn};

use crate::application::command_loop::{
    run_command_loop, shutdown_requested, ResponseEmitter, SessionEnd,
};
use crate::application::process_command::CommandProcessor;

/// Error type for serial port operations.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error("failed to open serial port {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: tokio_serial::Error,
    },
}

/// Opens `path` as 8N1 without flow control.
///
/// # Errors
///
/// Returns [`SerialError::Open`] if the port cannot be opened or configured.
pub fn open_serial(path: &Path, baud_rate: u32) -> Result<SerialStream, SerialError> {
    tokio_serial::new(path.to_string_lossy(), baud_rate)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .open_native_async()
        .map_err(|source| SerialError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Serial port settings for the supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialSettings {
    pub path: PathBuf,
    pub baud_rate: u32,
    pub reconnect_delay: Duration,
}

/// Reopens the serial port and reruns the command loop until shutdown.
pub struct SerialSupervisor {
    settings: SerialSettings,
    shutdown: watch::Receiver<bool>,
}

impl SerialSupervisor {
    pub fn new(settings: SerialSettings, shutdown: watch::Receiver<bool>) -> Self {
        Self { settings, shutdown }
    }

    /// Runs sessions back to back until shutdown is requested.
    pub async fn run(&mut self, processor: &mut CommandProcessor) {
        let path = self.settings.path.clone();
        loop {
            if *self.shutdown.borrow() {
                return;
            }

            match open_serial(&path, self.settings.baud_rate) {
                Ok(stream) => {
                    info!(
                        port = %path.display(),
                        baud = self.settings.baud_rate,
                        "serial session started"
                    );
                    let (read_half, write_half) = tokio::io::split(stream);
                    let mut emitter = ResponseEmitter::new(write_half);
                    match run_command_loop(
                        BufReader::new(read_half),
                        &mut emitter,
                        processor,
                        &mut self.shutdown,
                    )
                    .await
                    {
                        Ok(SessionEnd::Shutdown) => return,
                        Ok(SessionEnd::EndOfStream) => {
                            info!("serial session ended by host");
                        }
                        Err(e) => error!("serial session failed: {e}"),
                    }
                }
                Err(e) => warn!("{e}"),
            }

            info!("reopening serial port in {:?}", self.settings.reconnect_delay);
            if self.wait_or_shutdown(self.settings.reconnect_delay).await {
                return;
            }
        }
    }

    /// Sleeps for `delay`; returns `true` if shutdown was requested meanwhile.
    async fn wait_or_shutdown(&mut self, delay: Duration) -> bool {
        tokio::select! {
            _ = time::sleep(delay) => false,
            _ = shutdown_requested(&mut self.shutdown) => true,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
