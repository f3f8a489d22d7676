//! # digitizer-core
//!
//! Shared library for the HID digitizer containing the line protocol parser,
//! the authoritative pointer state, and the HID report encoder.
//!
//! This crate is used by the digitizer daemon and by host-side tooling that
//! formats commands for it.  It has zero dependencies on OS APIs, serial
//! ports, or device nodes.
//!
//! # Architecture overview
//!
//! The digitizer receives newline-terminated ASCII commands (`MOVE 100 200`,
//! `CLICK left`, `MEDIA_NEXT`, ...) and turns them into binary USB HID input
//! reports for a composite device exposing an absolute pointer and a
//! consumer-control (media key) collection.
//!
//! - **`protocol`** – The wire grammar.  [`parse_line`] turns one line into a
//!   typed [`Command`] or a [`ParseError`]; [`Response`] is the `OK` / `ERROR`
//!   acknowledgment sent back to the host.
//!
//! - **`domain`** – Pure state with no I/O.  [`PointerState`] records the last
//!   cursor position and the held buttons; [`ConsumerFlags`] is the transient
//!   media-key mask.
//!
//! - **`report`** – Byte-exact HID frames.  [`ReportEncoder`] applies a
//!   command to the pointer state and yields either a single frame or a
//!   press/release pair for momentary commands.  The composite report
//!   descriptor the frames conform to lives in [`report::descriptor`].

pub mod domain;
pub mod error;
pub mod protocol;
pub mod report;

// Re-export the most-used types at the crate root so callers can write
// `digitizer_core::Command` instead of `digitizer_core::protocol::command::Command`.
pub use domain::consumer::{ConsumerFlags, MediaKey};
pub use domain::pointer::{ButtonMask, InitialPosition, PointerState, MAX_COORDINATE};
pub use error::ErrorKind;
pub use protocol::command::{Axis, Button, Command};
pub use protocol::parser::{parse_bytes, parse_line, ParseError};
pub use protocol::response::Response;
pub use report::encoder::{Emission, MomentaryAction, MomentaryKind, ReportEncoder};
pub use report::frame::{ReportFrame, ReportId};
