//! Error classification shared by every layer of the digitizer.
//!
//! Each concrete error type (parse errors here, device errors in the daemon)
//! maps onto one [`ErrorKind`].  The kind's [`code`](ErrorKind::code) is the
//! stable token that prefixes the detail in an `ERROR` response line, so a
//! host can branch on it without parsing free-form text.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error taxonomy reported to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unknown verb, wrong argument count, empty or undecodable line.
    InvalidCommand,
    /// Non-numeric or out-of-range axis value.
    InvalidCoordinate,
    /// Button token other than `left` / `right`.
    InvalidButton,
    /// I/O failure writing a frame to a HID gadget node.
    DeviceWriteFailed,
}

impl ErrorKind {
    /// Wire code used in `ERROR <CODE>: <detail>` responses.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::InvalidCommand => "INVALID_COMMAND",
            ErrorKind::InvalidCoordinate => "INVALID_COORDINATE",
            ErrorKind::InvalidButton => "INVALID_BUTTON",
            ErrorKind::DeviceWriteFailed => "DEVICE_WRITE_FAILED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_screaming_snake_case() {
        assert_eq!(ErrorKind::InvalidCommand.code(), "INVALID_COMMAND");
        assert_eq!(ErrorKind::InvalidCoordinate.code(), "INVALID_COORDINATE");
        assert_eq!(ErrorKind::InvalidButton.code(), "INVALID_BUTTON");
        assert_eq!(ErrorKind::DeviceWriteFailed.code(), "DEVICE_WRITE_FAILED");
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(ErrorKind::DeviceWriteFailed.to_string(), "DEVICE_WRITE_FAILED");
    }
}
