//! Applies commands to the pointer state and produces report frames.
//!
//! | Command              | State effect                 | Emission                      |
//! |----------------------|------------------------------|-------------------------------|
//! | `Move{x,y}`          | position ← (x, y)            | 1 pointer frame               |
//! | `ButtonPress{b}`     | buttons \|= b                | 1 pointer frame               |
//! | `ButtonRelease{b}`   | buttons &= !b                | 1 pointer frame               |
//! | `Release`            | buttons ← 0                  | 1 pointer frame               |
//! | `Click{b}`           | none (b ends up clear)       | press + release pointer frames|
//! | `Media*`             | none                         | press + zeroed consumer frames|
//!
//! The encoder never sleeps and never writes: momentary commands come back as
//! a two-phase [`MomentaryAction`] schedule that the caller executes with its
//! own hold duration.

use tracing::trace;

use crate::domain::consumer::{ConsumerFlags, MediaKey};
use crate::domain::pointer::{InitialPosition, PointerState};
use crate::protocol::command::{Button, Command};
use crate::report::frame::ReportFrame;

/// What a momentary action presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MomentaryKind {
    Click(Button),
    Media(MediaKey),
}

/// Two-phase schedule: write `press` now, write `release` after the hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MomentaryAction {
    pub kind: MomentaryKind,
    pub press: ReportFrame,
    pub release: ReportFrame,
}

/// Frames produced for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    /// Write one frame immediately.
    Immediate(ReportFrame),
    /// Press, hold, release.
    Momentary(MomentaryAction),
}

impl Emission {
    /// Every frame of the emission, in write order.
    pub fn frames(&self) -> Vec<ReportFrame> {
        match self {
            Emission::Immediate(frame) => vec![*frame],
            Emission::Momentary(action) => vec![action.press, action.release],
        }
    }
}

/// Stateless translator from [`Command`] to [`Emission`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportEncoder;

impl ReportEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Applies `command` to `state` and returns the frames to emit.
    ///
    /// State is mutated before any frame is written; a later device failure
    /// does not roll it back.
    pub fn encode(&self, command: &Command, state: &mut PointerState) -> Emission {
        let emission = match *command {
            Command::Move { x, y } => {
                state.move_to(x, y);
                Emission::Immediate(ReportFrame::from_state(state))
            }
            Command::ButtonPress { button } => {
                state.press(button);
                Emission::Immediate(ReportFrame::from_state(state))
            }
            Command::ButtonRelease { button } => {
                state.release(button);
                Emission::Immediate(ReportFrame::from_state(state))
            }
            Command::Release => {
                state.release_all();
                Emission::Immediate(ReportFrame::from_state(state))
            }
            Command::Click { button } => self.click(button, state),
            Command::MediaPlayPause => Self::media(MediaKey::PlayPause),
            Command::MediaNext => Self::media(MediaKey::Next),
            Command::MediaPrev => Self::media(MediaKey::Prev),
        };
        trace!(%command, ?emission, "encoded command");
        emission
    }

    /// Frames that put the device in its safe state: cursor at `initial`,
    /// no buttons, no media key.  `state` is reset to match.
    pub fn reset(&self, state: &mut PointerState, initial: InitialPosition) -> [ReportFrame; 2] {
        state.reset(initial);
        [
            ReportFrame::from_state(state),
            ReportFrame::consumer(ConsumerFlags::NONE),
        ]
    }

    fn click(&self, button: Button, state: &mut PointerState) -> Emission {
        // The press uses a transient copy of the mask; other held buttons stay down.
        let pressed = state.buttons().with(button);
        let press = ReportFrame::pointer(state.x(), state.y(), pressed);
        // The clicked bit is never left set past the hold window.
        state.release(button);
        let release = ReportFrame::from_state(state);
        Emission::Momentary(MomentaryAction {
            kind: MomentaryKind::Click(button),
            press,
            release,
        })
    }

    fn media(key: MediaKey) -> Emission {
        Emission::Momentary(MomentaryAction {
            kind: MomentaryKind::Media(key),
            press: ReportFrame::consumer(ConsumerFlags::pressed(key)),
            release: ReportFrame::consumer(ConsumerFlags::NONE),
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
