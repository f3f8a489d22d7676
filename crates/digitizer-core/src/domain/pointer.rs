//! Authoritative pointer state: cursor position plus held buttons.

use serde::{Deserialize, Serialize};

use crate::protocol::command::Button;

/// Largest coordinate on either axis (logical maximum of the descriptor).
pub const MAX_COORDINATE: u16 = 32767;

/// Coordinate used for both axes by [`InitialPosition::Center`].
pub const CENTER_COORDINATE: u16 = 16384;

// ── ButtonMask ────────────────────────────────────────────────────────────────

/// Two-bit mask of held pointer buttons.
///
/// Bit layout (identical to the pointer report's button byte):
/// - Bit 0: Left (tip switch)
/// - Bit 1: Right (barrel switch)
///
/// Bits 2–7 are always zero; the only way to set a bit is through a
/// [`Button`], so no garbage can reach the padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct ButtonMask(u8);

impl ButtonMask {
    /// No buttons held.
    pub const NONE: ButtonMask = ButtonMask(0);

    /// Returns the mask with `button` set.
    pub fn with(self, button: Button) -> Self {
        ButtonMask(self.0 | button.mask())
    }

    /// Returns the mask with `button` cleared.  Clearing a clear bit is a no-op.
    pub fn without(self, button: Button) -> Self {
        ButtonMask(self.0 & !button.mask())
    }

    /// Returns `true` if `button` is held.
    pub fn contains(self, button: Button) -> bool {
        self.0 & button.mask() != 0
    }

    /// Returns `true` if no button is held.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw button byte as it appears in the pointer report.
    pub fn bits(self) -> u8 {
        self.0
    }
}

// ── InitialPosition ───────────────────────────────────────────────────────────

/// Where the cursor starts at process start and after a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InitialPosition {
    /// `(0, 0)`, the top-left corner.
    #[default]
    Origin,
    /// `(16384, 16384)`, the middle of the logical range.
    Center,
}

impl InitialPosition {
    /// The `(x, y)` pair for this position.
    pub fn coordinates(self) -> (u16, u16) {
        match self {
            InitialPosition::Origin => (0, 0),
            InitialPosition::Center => (CENTER_COORDINATE, CENTER_COORDINATE),
        }
    }
}

// ── PointerState ──────────────────────────────────────────────────────────────

/// The last reported cursor position and the currently held buttons.
///
/// Created once at start-up and mutated in place by every pointer-affecting
/// command.  It is owned by the command processor and passed by reference to
/// the encoder; there is no process-wide instance, so tests can create as many
/// isolated states as they like.
///
/// Coordinates are always within `[0, MAX_COORDINATE]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerState {
    x: u16,
    y: u16,
    buttons: ButtonMask,
}

impl PointerState {
    /// Creates a state at `initial` with no buttons held.
    pub fn new(initial: InitialPosition) -> Self {
        let (x, y) = initial.coordinates();
        Self {
            x,
            y,
            buttons: ButtonMask::NONE,
        }
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }

    /// The `(x, y)` pair.
    pub fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }

    pub fn buttons(&self) -> ButtonMask {
        self.buttons
    }

    /// Moves the cursor, leaving held buttons untouched.
    ///
    /// Values above [`MAX_COORDINATE`] are clamped; the parser never produces
    /// them, but the invariant holds regardless of the caller.
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.x = x.min(MAX_COORDINATE);
        self.y = y.min(MAX_COORDINATE);
    }

    /// Marks `button` as held.  Both buttons may be held at once.
    pub fn press(&mut self, button: Button) {
        self.buttons = self.buttons.with(button);
    }

    /// Marks `button` as released.  Idempotent.
    pub fn release(&mut self, button: Button) {
        self.buttons = self.buttons.without(button);
    }

    /// Releases every button.  Idempotent.
    pub fn release_all(&mut self) {
        self.buttons = ButtonMask::NONE;
    }

    /// Returns to `initial` with no buttons held.
    pub fn reset(&mut self, initial: InitialPosition) {
        *self = Self::new(initial);
    }
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new(InitialPosition::default())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_at_origin_has_no_buttons() {
        let state = PointerState::new(InitialPosition::Origin);
        assert_eq!(state.position(), (0, 0));
        assert!(state.buttons().is_empty());
    }

    #[test]
    fn test_new_state_at_center() {
        let state = PointerState::new(InitialPosition::Center);
        assert_eq!(state.position(), (16384, 16384));
    }

    #[test]
    fn test_move_keeps_buttons() {
        let mut state = PointerState::default();
        state.press(Button::Left);

        state.move_to(100, 200);

        assert_eq!(state.position(), (100, 200));
        assert!(state.buttons().contains(Button::Left));
    }

    #[test]
    fn test_move_clamps_to_max_coordinate() {
        let mut state = PointerState::default();
        state.move_to(u16::MAX, 40000);
        assert_eq!(state.position(), (MAX_COORDINATE, MAX_COORDINATE));
    }

    #[test]
    fn test_both_buttons_can_be_held() {
        let mut state = PointerState::default();
        state.press(Button::Left);
        state.press(Button::Right);
        assert_eq!(state.buttons().bits(), 0b11);
    }

    #[test]
    fn test_release_of_clear_button_is_noop() {
        let mut state = PointerState::default();
        state.press(Button::Right);

        state.release(Button::Left);

        assert_eq!(state.buttons().bits(), 0b10);
    }

    #[test]
    fn test_release_all_clears_mask() {
        let mut state = PointerState::default();
        state.press(Button::Left);
        state.press(Button::Right);

        state.release_all();
        state.release_all();

        assert!(state.buttons().is_empty());
    }

    #[test]
    fn test_reset_returns_to_initial_position() {
        let mut state = PointerState::new(InitialPosition::Center);
        state.move_to(1, 2);
        state.press(Button::Left);

        state.reset(InitialPosition::Center);

        assert_eq!(state, PointerState::new(InitialPosition::Center));
    }

    #[test]
    fn test_button_mask_padding_bits_stay_zero() {
        let mask = ButtonMask::NONE
            .with(Button::Left)
            .with(Button::Right)
            .without(Button::Left);
        assert_eq!(mask.bits() & 0b1111_1100, 0);
        assert_eq!(mask.bits(), 0b10);
    }
}
