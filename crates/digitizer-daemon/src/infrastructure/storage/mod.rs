//! Storage infrastructure: configuration file persistence.
//!
//! The `config` sub-module reads the TOML configuration file, falls back to
//! defaults when the file does not exist yet, and renders the effective
//! configuration as TOML for `print-config`.

pub mod config;
