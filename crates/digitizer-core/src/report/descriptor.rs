//! HID report descriptor of the composite pointer + consumer-control device.
//!
//! The descriptor is what the gadget provisioning writes into the function's
//! `report_desc`; the frames built in [`crate::report::frame`] must agree with
//! it byte for byte.  [`input_report_len`] walks the descriptor and derives the
//! input report length for a report ID, which the tests compare against the
//! frame lengths.
//!
//! # Short items (for readers new to HID descriptors)
//!
//! A descriptor is a flat list of *items*.  Each short item starts with a
//! prefix byte:
//!
//! ```text
//! bit  7..4   3..2   1..0
//!      tag    type   size (0, 1, 2 or 4 data bytes)
//! ```
//!
//! `type` 0 is a main item (Input, Output, Collection, ...), 1 a global item
//! (Report Size, Report Count, Report ID, ...) and 2 a local item (Usage, ...).
//! Globals persist until overwritten; every Input item contributes
//! `Report Size × Report Count` bits to the current report ID.

use thiserror::Error;

use crate::report::frame::ReportId;

/// Composite descriptor: Report ID 1 absolute pointer, Report ID 2 consumer control.
pub const REPORT_DESCRIPTOR: &[u8] = &[
    0x05, 0x01, // Usage Page (Generic Desktop)
    0x09, 0x02, // Usage (Mouse)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x01, //   Report ID (1)
    0x09, 0x01, //   Usage (Pointer)
    0xA1, 0x00, //   Collection (Physical)
    0x05, 0x09, //     Usage Page (Button)
    0x19, 0x01, //     Usage Minimum (1)
    0x29, 0x02, //     Usage Maximum (2)
    0x15, 0x00, //     Logical Minimum (0)
    0x25, 0x01, //     Logical Maximum (1)
    0x95, 0x02, //     Report Count (2)
    0x75, 0x01, //     Report Size (1)
    0x81, 0x02, //     Input (Data, Variable, Absolute) - tip/left, barrel/right
    0x95, 0x01, //     Report Count (1)
    0x75, 0x06, //     Report Size (6)
    0x81, 0x03, //     Input (Constant) - padding
    0x05, 0x01, //     Usage Page (Generic Desktop)
    0x09, 0x30, //     Usage (X)
    0x09, 0x31, //     Usage (Y)
    0x16, 0x00, 0x00, // Logical Minimum (0)
    0x26, 0xFF, 0x7F, // Logical Maximum (32767)
    0x75, 0x10, //     Report Size (16)
    0x95, 0x02, //     Report Count (2)
    0x81, 0x02, //     Input (Data, Variable, Absolute) - X, Y
    0xC0, //   End Collection
    0xC0, // End Collection
    0x05, 0x0C, // Usage Page (Consumer)
    0x09, 0x01, // Usage (Consumer Control)
    0xA1, 0x01, // Collection (Application)
    0x85, 0x02, //   Report ID (2)
    0x15, 0x00, //   Logical Minimum (0)
    0x25, 0x01, //   Logical Maximum (1)
    0x75, 0x01, //   Report Size (1)
    0x95, 0x03, //   Report Count (3)
    0x09, 0xCD, //   Usage (Play/Pause)
    0x09, 0xB5, //   Usage (Scan Next Track)
    0x09, 0xB6, //   Usage (Scan Previous Track)
    0x81, 0x02, //   Input (Data, Variable, Absolute)
    0x95, 0x01, //   Report Count (1)
    0x75, 0x05, //   Report Size (5)
    0x81, 0x03, //   Input (Constant) - padding
    0xC0, // End Collection
];

/// Errors raised while walking a descriptor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// An item's declared data runs past the end of the descriptor.
    #[error("descriptor truncated: item at offset {offset} needs {needed} data bytes")]
    Truncated { offset: usize, needed: usize },

    /// Pop without a matching Push.
    #[error("unbalanced Pop item at offset {offset}")]
    UnbalancedPop { offset: usize },

    /// Report Size × Report Count, or the running total, exceeds `u32`.
    #[error("input field at offset {offset} overflows the report bit count")]
    FieldOverflow { offset: usize },

    /// The descriptor declares no input fields for this report ID.
    #[error("no input report with ID {0}")]
    UnknownReportId(u8),
}

// Item prefixes with the size bits masked off.
const ITEM_INPUT: u8 = 0x80;
const ITEM_REPORT_SIZE: u8 = 0x74;
const ITEM_REPORT_ID: u8 = 0x84;
const ITEM_REPORT_COUNT: u8 = 0x94;
const ITEM_PUSH: u8 = 0xA4;
const ITEM_POP: u8 = 0xB4;
const LONG_ITEM_PREFIX: u8 = 0xFE;

#[derive(Debug, Clone, Copy, Default)]
struct Globals {
    report_size: u32,
    report_count: u32,
    report_id: u8,
}

/// Input report length in bytes for `report_id`, including the report ID
/// byte when the descriptor uses report IDs.
///
/// # Errors
///
/// Returns [`DescriptorError`] if the descriptor is malformed or declares no
/// input fields for `report_id`.
///
/// # Examples
///
/// ```rust
/// use digitizer_core::report::descriptor::{input_report_len, REPORT_DESCRIPTOR};
///
/// assert_eq!(input_report_len(REPORT_DESCRIPTOR, 1), Ok(6));
/// assert_eq!(input_report_len(REPORT_DESCRIPTOR, 2), Ok(2));
/// ```
pub fn input_report_len(descriptor: &[u8], report_id: u8) -> Result<usize, DescriptorError> {
    let mut globals = Globals::default();
    let mut stack: Vec<Globals> = Vec::new();
    let mut uses_report_ids = false;
    let mut bits: u32 = 0;
    let mut seen = false;

    let mut offset = 0;
    while offset < descriptor.len() {
        let prefix = descriptor[offset];

        if prefix == LONG_ITEM_PREFIX {
            // [0xFE][data size][long tag][data...]
            let size = *descriptor.get(offset + 1).ok_or(DescriptorError::Truncated {
                offset,
                needed: 2,
            })? as usize;
            offset += 3 + size;
            continue;
        }

        let size = match prefix & 0x03 {
            3 => 4,
            n => n as usize,
        };
        let data = descriptor
            .get(offset + 1..offset + 1 + size)
            .ok_or(DescriptorError::Truncated {
                offset,
                needed: size,
            })?;
        let value = data
            .iter()
            .rev()
            .fold(0u32, |acc, byte| (acc << 8) | u32::from(*byte));

        match prefix & 0xFC {
            ITEM_REPORT_SIZE => globals.report_size = value,
            ITEM_REPORT_COUNT => globals.report_count = value,
            ITEM_REPORT_ID => {
                globals.report_id = value as u8;
                uses_report_ids = true;
            }
            ITEM_PUSH => stack.push(globals),
            ITEM_POP => globals = stack.pop().ok_or(DescriptorError::UnbalancedPop { offset })?,
            ITEM_INPUT if globals.report_id == report_id => {
                bits = globals
                    .report_size
                    .checked_mul(globals.report_count)
                    .and_then(|field| bits.checked_add(field))
                    .ok_or(DescriptorError::FieldOverflow { offset })?;
                seen = true;
            }
            _ => {}
        }

        offset += 1 + size;
    }

    if !seen {
        return Err(DescriptorError::UnknownReportId(report_id));
    }
    let payload = bits.div_ceil(8) as usize;
    Ok(payload + usize::from(uses_report_ids))
}

/// Input report length of one of this device's reports in [`REPORT_DESCRIPTOR`].
///
/// # Errors
///
/// Only if [`REPORT_DESCRIPTOR`] itself were malformed.
pub fn declared_frame_len(id: ReportId) -> Result<usize, DescriptorError> {
    input_report_len(REPORT_DESCRIPTOR, id as u8)
}

/// Renders descriptor bytes as space-separated lower-case hex, 16 per line.
pub fn to_hex(descriptor: &[u8]) -> String {
    descriptor
        .chunks(16)
        .map(|line| {
            line.iter()
                .map(|byte| format!("{byte:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::frame::{CONSUMER_REPORT_LEN, POINTER_REPORT_LEN};

    #[test]
    fn test_pointer_report_is_six_bytes() {
        assert_eq!(declared_frame_len(ReportId::Pointer), Ok(POINTER_REPORT_LEN));
    }

    #[test]
    fn test_consumer_report_is_two_bytes() {
        assert_eq!(declared_frame_len(ReportId::Consumer), Ok(CONSUMER_REPORT_LEN));
    }

    #[test]
    fn test_unknown_report_id() {
        assert_eq!(
            input_report_len(REPORT_DESCRIPTOR, 3),
            Err(DescriptorError::UnknownReportId(3))
        );
    }

    #[test]
    fn test_descriptor_without_report_ids_has_no_id_byte() {
        // Button (3 bits) + padding (5 bits) + X/Y/Wheel (3 x 8 bits)
        let plain_mouse = [
            0x05, 0x01, 0x09, 0x02, 0xA1, 0x01, 0x09, 0x01, 0xA1, 0x00, 0x05, 0x09, 0x19, 0x01,
            0x29, 0x03, 0x15, 0x00, 0x25, 0x01, 0x95, 0x03, 0x75, 0x01, 0x81, 0x02, 0x95, 0x01,
            0x75, 0x05, 0x81, 0x01, 0x05, 0x01, 0x09, 0x30, 0x09, 0x31, 0x09, 0x38, 0x15, 0x81,
            0x25, 0x7F, 0x75, 0x08, 0x95, 0x03, 0x81, 0x06, 0xC0, 0xC0,
        ];
        assert_eq!(input_report_len(&plain_mouse, 0), Ok(4));
    }

    #[test]
    fn test_push_pop_restores_globals() {
        let descriptor = [
            0x85, 0x01, // Report ID (1)
            0x75, 0x08, // Report Size (8)
            0x95, 0x01, // Report Count (1)
            0xA4, // Push
            0x95, 0x04, // Report Count (4)
            0x81, 0x02, // Input: 32 bits
            0xB4, // Pop
            0x81, 0x02, // Input: 8 bits
        ];
        assert_eq!(input_report_len(&descriptor, 1), Ok(1 + 5));
    }

    #[test]
    fn test_truncated_item_is_an_error() {
        // Logical Maximum with a 2-byte payload but only one byte present.
        let descriptor = [0x85, 0x01, 0x26, 0xFF];
        assert_eq!(
            input_report_len(&descriptor, 1),
            Err(DescriptorError::Truncated {
                offset: 2,
                needed: 2
            })
        );
    }

    #[test]
    fn test_oversized_field_is_an_error() {
        // Report Size and Report Count both 0xFFFF_FFFF via 4-byte items.
        let descriptor = [
            0x85, 0x01, // Report ID (1)
            0x77, 0xFF, 0xFF, 0xFF, 0xFF, // Report Size
            0x97, 0xFF, 0xFF, 0xFF, 0xFF, // Report Count
            0x81, 0x02, // Input
        ];
        assert_eq!(
            input_report_len(&descriptor, 1),
            Err(DescriptorError::FieldOverflow { offset: 12 })
        );
    }

    #[test]
    fn test_accumulated_bits_overflow_is_an_error() {
        let descriptor = [
            0x85, 0x01, // Report ID (1)
            0x77, 0x00, 0x00, 0x00, 0x80, // Report Size (2^31)
            0x95, 0x01, // Report Count (1)
            0x81, 0x02, // Input: 2^31 bits
            0x81, 0x02, // Input: another 2^31 bits
        ];
        assert_eq!(
            input_report_len(&descriptor, 1),
            Err(DescriptorError::FieldOverflow { offset: 11 })
        );
    }

    #[test]
    fn test_unbalanced_pop_is_an_error() {
        assert_eq!(
            input_report_len(&[0xB4], 0),
            Err(DescriptorError::UnbalancedPop { offset: 0 })
        );
    }

    #[test]
    fn test_to_hex_wraps_every_sixteen_bytes() {
        let hex = to_hex(&[0u8; 17]);
        let lines: Vec<&str> = hex.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "00");
        assert!(to_hex(REPORT_DESCRIPTOR).starts_with("05 01 09 02 a1 01 85 01"));
    }
}
