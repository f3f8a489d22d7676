//! Application layer use cases for the digitizer service.
//!
//! # What use cases does the service have?
//!
//! - **`device_writer`** – Routes each encoded frame to the gadget node for
//!   its report ID.  The actual write is made by a `ReportSink`
//!   implementation that is injected at construction time.
//!
//! - **`momentary`** – Executes the press → hold → release schedule of
//!   `CLICK` and `MEDIA_*` commands.
//!
//! - **`process_command`** – Parses one line, applies it to the pointer state,
//!   writes the resulting frames, and builds the acknowledgment.
//!
//! - **`command_loop`** – Reads lines from the transport one at a time and
//!   writes the acknowledgments back.

pub mod command_loop;
pub mod device_writer;
pub mod momentary;
pub mod process_command;
