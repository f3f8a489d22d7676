//! Domain layer: pure state with no I/O.
//!
//! - **`pointer`** – [`PointerState`], the single authoritative record of the
//!   last reported cursor position and the buttons currently held.  It lives
//!   for the whole process and is mutated only by the encoder.
//! - **`consumer`** – [`ConsumerFlags`], the media-key mask.  Unlike the
//!   pointer state it never persists: a flag exists only for the duration of
//!   one momentary media action.
//!
//! [`PointerState`]: pointer::PointerState
//! [`ConsumerFlags`]: consumer::ConsumerFlags

pub mod consumer;
pub mod pointer;

pub use consumer::{ConsumerFlags, MediaKey};
pub use pointer::{ButtonMask, InitialPosition, PointerState, CENTER_COORDINATE, MAX_COORDINATE};
