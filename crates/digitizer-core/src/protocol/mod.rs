//! Protocol module containing the command types, the line parser, and the
//! acknowledgment format.

pub mod command;
pub mod parser;
pub mod response;

pub use command::{Axis, Button, Command};
pub use parser::{parse_bytes, parse_line, ParseError};
pub use response::Response;
