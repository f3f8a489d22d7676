//! digitizer-daemon library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does the daemon do?
//!
//! The daemon runs on a board that presents itself to a host computer as a
//! USB composite device: a serial port, an absolute pointer, and a media-key
//! keyboard.  The host (or a program on it) writes text commands to the
//! serial port and the daemon turns them into HID input reports:
//!
//! 1. Reads one newline-terminated line from the serial port.
//! 2. Parses it into a `Command` (`digitizer_core::parse_line`).
//! 3. Applies it to the pointer state and encodes the report frame(s).
//! 4. Writes the frames to the HID gadget nodes, holding momentary presses
//!    for the configured duration.
//! 5. Answers `OK` or `ERROR <CODE>: <detail>` on the serial port.

/// Application layer: use cases for the service.
pub mod application;

/// Infrastructure layer: gadget nodes, serial port, and configuration storage.
pub mod infrastructure;
