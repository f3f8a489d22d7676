//! Fixed-length HID input report frames.
//!
//! Wire format (bit-exact):
//! ```text
//! Pointer  (6 bytes): [0x01][buttons][x_lo][x_hi][y_lo][y_hi]
//! Consumer (2 bytes): [0x02][flags]
//! ```
//! Coordinates are little-endian.  `buttons` uses bits 0–1 and `flags` bits
//! 0–2; every other bit is zero.

use std::fmt;

use crate::domain::consumer::ConsumerFlags;
use crate::domain::pointer::{ButtonMask, PointerState, MAX_COORDINATE};

/// Total pointer frame length, report ID included.
pub const POINTER_REPORT_LEN: usize = 6;

/// Total consumer frame length, report ID included.
pub const CONSUMER_REPORT_LEN: usize = 2;

/// Leading byte selecting the report definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ReportId {
    Pointer = 0x01,
    Consumer = 0x02,
}

impl ReportId {
    /// Frame length for this report, report ID included.
    pub fn frame_len(self) -> usize {
        match self {
            ReportId::Pointer => POINTER_REPORT_LEN,
            ReportId::Consumer => CONSUMER_REPORT_LEN,
        }
    }
}

impl TryFrom<u8> for ReportId {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(ReportId::Pointer),
            0x02 => Ok(ReportId::Consumer),
            _ => Err(()),
        }
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportId::Pointer => f.write_str("pointer"),
            ReportId::Consumer => f.write_str("consumer"),
        }
    }
}

/// One encoded report, ready to be written to a gadget node as-is.
///
/// Frames can only be built from typed state, so the length and the padding
/// bits are correct by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportFrame {
    Pointer([u8; POINTER_REPORT_LEN]),
    Consumer([u8; CONSUMER_REPORT_LEN]),
}

impl ReportFrame {
    /// Pointer frame for an explicit position and button mask.
    pub fn pointer(x: u16, y: u16, buttons: ButtonMask) -> Self {
        let [x_lo, x_hi] = x.min(MAX_COORDINATE).to_le_bytes();
        let [y_lo, y_hi] = y.min(MAX_COORDINATE).to_le_bytes();
        ReportFrame::Pointer([
            ReportId::Pointer as u8,
            buttons.bits(),
            x_lo,
            x_hi,
            y_lo,
            y_hi,
        ])
    }

    /// Pointer frame mirroring `state`.
    pub fn from_state(state: &PointerState) -> Self {
        Self::pointer(state.x(), state.y(), state.buttons())
    }

    /// Consumer frame for `flags`.
    pub fn consumer(flags: ConsumerFlags) -> Self {
        ReportFrame::Consumer([ReportId::Consumer as u8, flags.bits()])
    }

    pub fn report_id(&self) -> ReportId {
        match self {
            ReportFrame::Pointer(_) => ReportId::Pointer,
            ReportFrame::Consumer(_) => ReportId::Consumer,
        }
    }

    /// The frame bytes, report ID first.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ReportFrame::Pointer(bytes) => bytes,
            ReportFrame::Consumer(bytes) => bytes,
        }
    }

    /// Frame length in bytes; always [`ReportId::frame_len`] of the report ID.
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    /// Always `false`; frames have a fixed, non-zero length.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Space-separated upper-case hex, e.g. `01 01 64 00 C8 00`.
impl fmt::Display for ReportFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::consumer::MediaKey;
    use crate::protocol::command::Button;

    #[test]
    fn test_pointer_frame_layout_is_little_endian() {
        let frame = ReportFrame::pointer(0x1234, 0x7ABC, ButtonMask::NONE.with(Button::Right));
        assert_eq!(frame.as_bytes(), &[0x01, 0b10, 0x34, 0x12, 0xBC, 0x7A]);
        assert_eq!(frame.report_id(), ReportId::Pointer);
        assert_eq!(frame.len(), POINTER_REPORT_LEN);
    }

    #[test]
    fn test_pointer_frame_at_max_coordinates() {
        let frame = ReportFrame::pointer(MAX_COORDINATE, MAX_COORDINATE, ButtonMask::NONE);
        assert_eq!(frame.as_bytes(), &[0x01, 0x00, 0xFF, 0x7F, 0xFF, 0x7F]);
    }

    #[test]
    fn test_consumer_frame_layout() {
        let frame = ReportFrame::consumer(ConsumerFlags::pressed(MediaKey::Prev));
        assert_eq!(frame.as_bytes(), &[0x02, 0b100]);
        assert_eq!(frame.report_id(), ReportId::Consumer);
        assert_eq!(frame.len(), CONSUMER_REPORT_LEN);
    }

    #[test]
    fn test_frame_len_matches_report_id() {
        let pointer = ReportFrame::pointer(1, 2, ButtonMask::NONE);
        let consumer = ReportFrame::consumer(ConsumerFlags::NONE);
        assert_eq!(pointer.len(), pointer.report_id().frame_len());
        assert_eq!(consumer.len(), consumer.report_id().frame_len());
    }

    #[test]
    fn test_report_id_try_from() {
        assert_eq!(ReportId::try_from(0x01), Ok(ReportId::Pointer));
        assert_eq!(ReportId::try_from(0x02), Ok(ReportId::Consumer));
        assert_eq!(ReportId::try_from(0x03), Err(()));
    }

    #[test]
    fn test_display_is_hex() {
        let frame = ReportFrame::pointer(100, 200, ButtonMask::NONE.with(Button::Left));
        assert_eq!(frame.to_string(), "01 01 64 00 C8 00");
    }
}
