//! Report module containing the frame layouts, the encoder, and the HID
//! report descriptor they conform to.

pub mod descriptor;
pub mod encoder;
pub mod frame;

pub use encoder::{Emission, MomentaryAction, MomentaryKind, ReportEncoder};
pub use frame::{ReportFrame, ReportId, CONSUMER_REPORT_LEN, POINTER_REPORT_LEN};
