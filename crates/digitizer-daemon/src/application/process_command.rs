//! CommandProcessor: parse → encode → write for one line at a time.
//!
//! The processor owns the only [`PointerState`] in the process together with
//! the encoder, the momentary actuator and the device writer.  It is driven
//! by the command loop but has no knowledge of the transport, so tests can
//! feed it lines directly.
//!
//! # Ordering guarantees
//!
//! - Parse errors are detected before the state is touched.
//! - State is updated before any frame is written and is not rolled back if
//!   a write fails.
//! - A momentary command returns only after its release frame was written.

use std::time::Duration;

use digitizer_core::{
    parse_bytes, Command, Emission, ErrorKind, InitialPosition, ParseError, PointerState,
    ReportEncoder, Response,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::device_writer::{DeviceError, DeviceWriter};
use crate::application::momentary::{MomentaryActuator, DEFAULT_HOLD};

/// Failure of a single command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

impl CommandError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CommandError::Parse(e) => e.kind(),
            CommandError::Device(_) => ErrorKind::DeviceWriteFailed,
        }
    }

    /// The `ERROR <CODE>: <detail>` acknowledgment for this failure.
    pub fn to_response(&self) -> Response {
        Response::error(self.kind(), self)
    }
}

/// Tunables for a [`CommandProcessor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorSettings {
    /// Press-to-release delay for `CLICK` and `MEDIA_*`.
    pub hold: Duration,
    /// Where the cursor starts and where [`CommandProcessor::reset`] puts it.
    pub initial_position: InitialPosition,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            hold: DEFAULT_HOLD,
            initial_position: InitialPosition::default(),
        }
    }
}

/// Executes commands against the pointer state and the gadget nodes.
pub struct CommandProcessor {
    state: PointerState,
    encoder: ReportEncoder,
    actuator: MomentaryActuator,
    writer: DeviceWriter,
    initial_position: InitialPosition,
}

impl CommandProcessor {
    pub fn new(writer: DeviceWriter, settings: ProcessorSettings) -> Self {
        Self {
            state: PointerState::new(settings.initial_position),
            encoder: ReportEncoder::new(),
            actuator: MomentaryActuator::new(settings.hold),
            writer,
            initial_position: settings.initial_position,
        }
    }

    /// The current pointer state.
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn actuator(&self) -> &MomentaryActuator {
        &self.actuator
    }

    /// Handles one raw line and returns the acknowledgment to send.
    ///
    /// Returns `None` for a blank line, which is skipped without a response.
    pub async fn handle_line(&mut self, line: &[u8]) -> Option<Response> {
        if line.iter().all(u8::is_ascii_whitespace) {
            return None;
        }

        let result = match parse_bytes(line) {
            Ok(command) => {
                debug!(%command, "received command");
                self.execute(&command).await
            }
            Err(e) => Err(CommandError::Parse(e)),
        };

        Some(match result {
            Ok(()) => Response::Ok,
            Err(e) => {
                warn!(line = %String::from_utf8_lossy(line).trim(), "command rejected: {e}");
                e.to_response()
            }
        })
    }

    /// Applies `command` and writes its frames.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Device`] if a frame could not be written.  The
    /// state change has already been applied at that point.
    pub async fn execute(&mut self, command: &Command) -> Result<(), CommandError> {
        match self.encoder.encode(command, &mut self.state) {
            Emission::Immediate(frame) => self.writer.write(&frame).await?,
            Emission::Momentary(action) => {
                self.actuator.actuate(&action, &mut self.writer).await?
            }
        }
        Ok(())
    }

    /// Puts the device into its safe state: cursor at the initial position,
    /// no buttons held, no media key active.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeviceError`]; the consumer frame is still
    /// attempted if the pointer frame fails.
    pub async fn reset(&mut self) -> Result<(), DeviceError> {
        let [pointer, consumer] = self.encoder.reset(&mut self.state, self.initial_position);
        let pointer_result = self.writer.write(&pointer).await;
        let consumer_result = self.writer.write(&consumer).await;
        pointer_result.and(consumer_result)?;

        let (x, y) = self.state.position();
        info!(x, y, "device reset");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
