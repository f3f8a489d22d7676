//! Acknowledgment lines sent back to the host after every command.
//!
//! Response grammar: `OK\n` | `ERROR <message>\n`.  The digitizer always
//! formats `<message>` as `<CODE>: <detail>` where `<CODE>` is an
//! [`ErrorKind`] wire code.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;

const OK: &str = "OK";
const ERROR: &str = "ERROR";

/// One acknowledgment line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    /// The command fully succeeded (for momentary commands: after the
    /// release frame was written).
    Ok,
    /// The command failed; the string is the message after `ERROR `, possibly
    /// empty.
    Error(String),
}

impl Response {
    /// Builds an `ERROR <CODE>: <detail>` response.
    pub fn error(kind: ErrorKind, detail: impl fmt::Display) -> Self {
        Response::Error(format!("{}: {detail}", kind.code()))
    }

    /// Returns `true` for [`Response::Ok`].
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }

    /// Renders the response including the trailing newline.
    pub fn to_line(&self) -> String {
        format!("{self}\n")
    }

    /// Classifies a response line read from the digitizer.
    ///
    /// Anything that is neither `OK` nor starts with `ERROR` is reported as
    /// an error carrying `unknown response: <line>`.
    ///
    /// ```rust
    /// use digitizer_core::Response;
    ///
    /// assert_eq!(Response::parse("OK\n"), Response::Ok);
    /// assert_eq!(
    ///     Response::parse("ERROR INVALID_BUTTON: invalid button 'up'"),
    ///     Response::Error("INVALID_BUTTON: invalid button 'up'".to_string())
    /// );
    /// ```
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line == OK {
            return Response::Ok;
        }
        match line.strip_prefix(ERROR) {
            Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => {
                Response::Error(rest.trim().to_string())
            }
            _ => Response::Error(format!("unknown response: {line}")),
        }
    }

    /// The [`ErrorKind`] named by an error message, if it carries a known code.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        let Response::Error(message) = self else {
            return None;
        };
        let code = message.split(':').next()?.trim();
        [
            ErrorKind::InvalidCommand,
            ErrorKind::InvalidCoordinate,
            ErrorKind::InvalidButton,
            ErrorKind::DeviceWriteFailed,
        ]
        .into_iter()
        .find(|kind| kind.code() == code)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Ok => f.write_str(OK),
            Response::Error(message) if message.is_empty() => f.write_str(ERROR),
            Response::Error(message) => write!(f, "{ERROR} {message}"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_line() {
        assert_eq!(Response::Ok.to_line(), "OK\n");
        assert!(Response::Ok.is_ok());
    }

    #[test]
    fn test_error_line_carries_code_and_detail() {
        let response = Response::error(ErrorKind::DeviceWriteFailed, "broken pipe");
        assert_eq!(response.to_line(), "ERROR DEVICE_WRITE_FAILED: broken pipe\n");
        assert!(!response.is_ok());
        assert_eq!(response.error_kind(), Some(ErrorKind::DeviceWriteFailed));
    }

    #[test]
    fn test_bare_error_line() {
        assert_eq!(Response::Error(String::new()).to_line(), "ERROR\n");
        assert_eq!(Response::parse("ERROR"), Response::Error(String::new()));
    }

    #[test]
    fn test_parse_unknown_response() {
        assert_eq!(
            Response::parse("HELLO"),
            Response::Error("unknown response: HELLO".to_string())
        );
        // A word that merely begins with ERROR is not an error response.
        assert_eq!(
            Response::parse("ERRORS"),
            Response::Error("unknown response: ERRORS".to_string())
        );
    }

    #[test]
    fn test_error_kind_of_free_form_message_is_none() {
        assert_eq!(Response::Error("Internal error".into()).error_kind(), None);
        assert_eq!(Response::Ok.error_kind(), None);
    }
}
