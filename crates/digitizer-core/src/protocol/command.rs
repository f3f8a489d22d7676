//! Typed commands of the digitizer line protocol.
//!
//! Wire grammar (ASCII, newline-terminated, verbs case-insensitive):
//!
//! ```text
//! MOVE <x:0-32767> <y:0-32767>
//! CLICK <left|right>
//! RELEASE
//! BUTTON_PRESS <left|right>
//! BUTTON_RELEASE <left|right>
//! MEDIA_PLAY_PAUSE
//! MEDIA_NEXT
//! MEDIA_PREV
//! ```
//!
//! [`Command`] is a closed set: the encoder matches on it exhaustively, so a
//! new verb cannot be added without the compiler pointing at every place that
//! must handle it.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Verb constants ────────────────────────────────────────────────────────────

/// Canonical (upper-case) spelling of every verb.
pub mod verbs {
    pub const MOVE: &str = "MOVE";
    pub const CLICK: &str = "CLICK";
    pub const RELEASE: &str = "RELEASE";
    pub const BUTTON_PRESS: &str = "BUTTON_PRESS";
    pub const BUTTON_RELEASE: &str = "BUTTON_RELEASE";
    pub const MEDIA_PLAY_PAUSE: &str = "MEDIA_PLAY_PAUSE";
    pub const MEDIA_NEXT: &str = "MEDIA_NEXT";
    pub const MEDIA_PREV: &str = "MEDIA_PREV";

    /// All verbs, in grammar order.
    pub const ALL: [&str; 8] = [
        MOVE,
        CLICK,
        RELEASE,
        BUTTON_PRESS,
        BUTTON_RELEASE,
        MEDIA_PLAY_PAUSE,
        MEDIA_NEXT,
        MEDIA_PREV,
    ];
}

// ── Button ────────────────────────────────────────────────────────────────────

/// Pointer button addressed by `CLICK`, `BUTTON_PRESS` and `BUTTON_RELEASE`.
///
/// On the wire the pointer report's button byte carries `Left` in bit 0 (tip
/// switch / primary) and `Right` in bit 1 (barrel / secondary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Button {
    Left = 0x01,
    Right = 0x02,
}

impl Button {
    /// Bit this button occupies in the pointer report's button byte.
    pub fn mask(self) -> u8 {
        self as u8
    }

    /// Lower-case wire token (`"left"` / `"right"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Button::Left => "left",
            Button::Right => "right",
        }
    }

    /// Matches a wire token case-insensitively.
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("left") {
            Some(Button::Left)
        } else if token.eq_ignore_ascii_case("right") {
            Some(Button::Right)
        } else {
            None
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Axis ──────────────────────────────────────────────────────────────────────

/// Coordinate axis, used to name the offending argument in `MOVE` errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => f.write_str("X"),
            Axis::Y => f.write_str("Y"),
        }
    }
}

// ── Command ───────────────────────────────────────────────────────────────────

/// One parsed protocol line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Absolute cursor move; held buttons are kept.
    Move { x: u16, y: u16 },
    /// Momentary press-hold-release of one button.
    Click { button: Button },
    /// Release every held button.
    Release,
    /// Press and keep holding one button.
    ButtonPress { button: Button },
    /// Release one button.
    ButtonRelease { button: Button },
    /// Momentary Play/Pause media key.
    MediaPlayPause,
    /// Momentary Scan Next Track media key.
    MediaNext,
    /// Momentary Scan Previous Track media key.
    MediaPrev,
}

impl Command {
    /// Canonical verb for this command.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Move { .. } => verbs::MOVE,
            Command::Click { .. } => verbs::CLICK,
            Command::Release => verbs::RELEASE,
            Command::ButtonPress { .. } => verbs::BUTTON_PRESS,
            Command::ButtonRelease { .. } => verbs::BUTTON_RELEASE,
            Command::MediaPlayPause => verbs::MEDIA_PLAY_PAUSE,
            Command::MediaNext => verbs::MEDIA_NEXT,
            Command::MediaPrev => verbs::MEDIA_PREV,
        }
    }

    /// Returns `true` for commands that produce a press frame followed by a
    /// release frame after the hold duration.
    pub fn is_momentary(&self) -> bool {
        matches!(
            self,
            Command::Click { .. }
                | Command::MediaPlayPause
                | Command::MediaNext
                | Command::MediaPrev
        )
    }
}

/// Renders the canonical wire line, without the newline terminator.
///
/// ```rust
/// use digitizer_core::{Button, Command};
///
/// assert_eq!(Command::Move { x: 16384, y: 8192 }.to_string(), "MOVE 16384 8192");
/// assert_eq!(Command::Click { button: Button::Left }.to_string(), "CLICK left");
/// assert_eq!(Command::MediaNext.to_string(), "MEDIA_NEXT");
/// ```
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Move { x, y } => write!(f, "{} {x} {y}", self.verb()),
            Command::Click { button }
            | Command::ButtonPress { button }
            | Command::ButtonRelease { button } => write!(f, "{} {button}", self.verb()),
            Command::Release
            | Command::MediaPlayPause
            | Command::MediaNext
            | Command::MediaPrev => f.write_str(self.verb()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
