//! MomentaryActuator: executes press → hold → release schedules.
//!
//! `CLICK` and the `MEDIA_*` verbs have no explicit release command; the
//! encoder hands back a [`MomentaryAction`] and this actuator writes the press
//! frame, waits out the hold duration, then writes the release frame.
//!
//! ```text
//!   Idle ──press written──▶ Holding{kind, deadline} ──deadline reached──▶ Idle
//!                                                     (release written)
//! ```
//!
//! The hold is a `tokio::time::sleep_until`, so the command loop awaiting the
//! actuator cannot read another line until the release frame is out.

use std::time::Duration;

use digitizer_core::{MomentaryAction, MomentaryKind};
use tokio::time::{self, Instant};
use tracing::debug;

use crate::application::device_writer::{DeviceError, DeviceWriter};

/// Default time between the press and the release frame.
pub const DEFAULT_HOLD: Duration = Duration::from_millis(50);

/// Observable actuator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorState {
    Idle,
    /// The press frame has been written; the release is due at `deadline`.
    Holding {
        kind: MomentaryKind,
        deadline: Instant,
    },
}

/// Runs one momentary action at a time.
#[derive(Debug)]
pub struct MomentaryActuator {
    hold: Duration,
    state: ActuatorState,
}

impl MomentaryActuator {
    pub fn new(hold: Duration) -> Self {
        Self {
            hold,
            state: ActuatorState::Idle,
        }
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    pub fn state(&self) -> ActuatorState {
        self.state
    }

    /// Writes the press frame, holds, then writes the release frame.
    ///
    /// If the press write fails the release is not attempted.  The actuator
    /// is back in [`ActuatorState::Idle`] when this returns either way.
    ///
    /// # Errors
    ///
    /// Returns the [`DeviceError`] of whichever write failed.
    pub async fn actuate(
        &mut self,
        action: &MomentaryAction,
        writer: &mut DeviceWriter,
    ) -> Result<(), DeviceError> {
        writer.write(&action.press).await?;

        let deadline = Instant::now() + self.hold;
        self.state = ActuatorState::Holding {
            kind: action.kind,
            deadline,
        };
        debug!(kind = ?action.kind, hold_ms = self.hold.as_millis() as u64, "holding");

        time::sleep_until(deadline).await;

        self.state = ActuatorState::Idle;
        debug!(kind = ?action.kind, "hold released");
        writer.write(&action.release).await
    }
}

impl Default for MomentaryActuator {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
