//! Line parser for the digitizer protocol.
//!
//! [`parse_line`] is a pure function: it performs no I/O and touches no state,
//! so every rejection happens before the pointer state or a device node is
//! involved.

use std::num::IntErrorKind;

use thiserror::Error;

use crate::domain::pointer::MAX_COORDINATE;
use crate::error::ErrorKind;
use crate::protocol::command::{verbs, Axis, Button, Command};

/// Errors produced while parsing a protocol line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line contained no tokens.
    #[error("empty command")]
    Empty,

    /// The first token is not a known verb.
    #[error("unknown command: {verb}")]
    UnknownCommand { verb: String },

    /// A known verb received the wrong number of arguments.
    #[error("{verb} expects {expected} argument(s), got {found}")]
    WrongArgumentCount {
        verb: &'static str,
        expected: usize,
        found: usize,
    },

    /// A `MOVE` argument is not an integer.
    #[error("{axis} coordinate '{token}' is not an integer")]
    NotAnInteger { axis: Axis, token: String },

    /// A `MOVE` argument is an integer outside `[0, max]`.
    #[error("{axis} coordinate {value} out of range [0, {max}]")]
    CoordinateOutOfRange { axis: Axis, value: String, max: u16 },

    /// The button token is neither `left` nor `right`.
    #[error("invalid button '{token}', must be one of: left, right")]
    InvalidButton { token: String },

    /// The raw line bytes were not valid UTF-8.
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

impl ParseError {
    /// Maps the error onto the host-visible taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParseError::Empty
            | ParseError::UnknownCommand { .. }
            | ParseError::WrongArgumentCount { .. }
            | ParseError::InvalidEncoding => ErrorKind::InvalidCommand,
            ParseError::NotAnInteger { .. } | ParseError::CoordinateOutOfRange { .. } => {
                ErrorKind::InvalidCoordinate
            }
            ParseError::InvalidButton { .. } => ErrorKind::InvalidButton,
        }
    }
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parses one protocol line into a [`Command`].
///
/// Trailing CR/LF and surrounding whitespace are ignored; arguments are
/// separated by runs of ASCII whitespace.  Verbs and button names match
/// case-insensitively.
///
/// # Errors
///
/// Returns [`ParseError`] for an empty line, an unknown verb, a wrong argument
/// count, a bad coordinate or a bad button token.
///
/// # Examples
///
/// ```rust
/// use digitizer_core::{parse_line, Button, Command};
///
/// assert_eq!(parse_line("move 100 200\r\n"), Ok(Command::Move { x: 100, y: 200 }));
/// assert_eq!(parse_line("CLICK Right"), Ok(Command::Click { button: Button::Right }));
/// assert!(parse_line("MOVE 99999 100").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Command, ParseError> {
    let mut tokens = line.split_ascii_whitespace();
    let verb_token = tokens.next().ok_or(ParseError::Empty)?;
    let args: Vec<&str> = tokens.collect();

    let verb = canonical_verb(verb_token).ok_or_else(|| ParseError::UnknownCommand {
        verb: verb_token.to_string(),
    })?;

    match verb {
        verbs::MOVE => {
            require_args(verb, &args, 2)?;
            let x = parse_coordinate(Axis::X, args[0])?;
            let y = parse_coordinate(Axis::Y, args[1])?;
            Ok(Command::Move { x, y })
        }
        verbs::CLICK => {
            require_args(verb, &args, 1)?;
            Ok(Command::Click {
                button: parse_button(args[0])?,
            })
        }
        verbs::BUTTON_PRESS => {
            require_args(verb, &args, 1)?;
            Ok(Command::ButtonPress {
                button: parse_button(args[0])?,
            })
        }
        verbs::BUTTON_RELEASE => {
            require_args(verb, &args, 1)?;
            Ok(Command::ButtonRelease {
                button: parse_button(args[0])?,
            })
        }
        verbs::RELEASE => {
            require_args(verb, &args, 0)?;
            Ok(Command::Release)
        }
        verbs::MEDIA_PLAY_PAUSE => {
            require_args(verb, &args, 0)?;
            Ok(Command::MediaPlayPause)
        }
        verbs::MEDIA_NEXT => {
            require_args(verb, &args, 0)?;
            Ok(Command::MediaNext)
        }
        verbs::MEDIA_PREV => {
            require_args(verb, &args, 0)?;
            Ok(Command::MediaPrev)
        }
        // canonical_verb only returns entries of verbs::ALL
        other => Err(ParseError::UnknownCommand {
            verb: other.to_string(),
        }),
    }
}

/// Parses raw line bytes, rejecting invalid UTF-8 before tokenising.
///
/// # Errors
///
/// Returns [`ParseError::InvalidEncoding`] for non-UTF-8 input, otherwise
/// whatever [`parse_line`] returns.
pub fn parse_bytes(line: &[u8]) -> Result<Command, ParseError> {
    let text = std::str::from_utf8(line).map_err(|_| ParseError::InvalidEncoding)?;
    parse_line(text)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn canonical_verb(token: &str) -> Option<&'static str> {
    verbs::ALL
        .iter()
        .copied()
        .find(|verb| verb.eq_ignore_ascii_case(token))
}

fn require_args(verb: &'static str, args: &[&str], expected: usize) -> Result<(), ParseError> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(ParseError::WrongArgumentCount {
            verb,
            expected,
            found: args.len(),
        })
    }
}

fn parse_coordinate(axis: Axis, token: &str) -> Result<u16, ParseError> {
    // ASCII digits, optionally after one '-'; `i64::from_str` alone would accept '+'.
    let digits = token.strip_prefix('-').unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::NotAnInteger {
            axis,
            token: token.to_string(),
        });
    }

    match token.parse::<i64>() {
        Ok(value) if (0..=i64::from(MAX_COORDINATE)).contains(&value) => Ok(value as u16),
        Ok(value) => Err(ParseError::CoordinateOutOfRange {
            axis,
            value: value.to_string(),
            max: MAX_COORDINATE,
        }),
        // Digits only, but wider than i64: still an integer, just far out of range.
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(ParseError::CoordinateOutOfRange {
                axis,
                value: token.to_string(),
                max: MAX_COORDINATE,
            })
        }
        Err(_) => Err(ParseError::NotAnInteger {
            axis,
            token: token.to_string(),
        }),
    }
}

fn parse_button(token: &str) -> Result<Button, ParseError> {
    Button::from_token(token).ok_or_else(|| ParseError::InvalidButton {
        token: token.to_string(),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
