//! Infrastructure layer for the digitizer service.
//!
//! Contains OS-facing adapters: the HID gadget device nodes, the serial
//! command port, and configuration file storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `digitizer_core`, but MUST NOT be imported by the `application` layer
//! outside of tests.
//!
//! # Sub-modules
//!
//! - **`hid_gadget`** – `ReportSink` over `/dev/hidgN` nodes, plus a
//!   `RecordingSink` used by tests.
//!
//! - **`serial`** – Opens the CDC ACM serial port and supervises command
//!   sessions, reopening the port when the host goes away.
//!
//! - **`storage`** – TOML configuration loading and saving.

pub mod hid_gadget;
pub mod serial;
pub mod storage;
