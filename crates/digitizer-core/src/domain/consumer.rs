//! Consumer-control (media key) flags.

use serde::{Deserialize, Serialize};

/// Media key addressed by the `MEDIA_*` verbs.
///
/// Media keys are momentary only: there is no press/hold/release variant for
/// the consumer collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKey {
    /// Usage 0xCD, Play/Pause.
    PlayPause,
    /// Usage 0xB5, Scan Next Track.
    Next,
    /// Usage 0xB6, Scan Previous Track.
    Prev,
}

impl MediaKey {
    /// Bit this key occupies in the consumer report's flag byte.
    pub fn flag(self) -> u8 {
        match self {
            MediaKey::PlayPause => ConsumerFlags::PLAY_PAUSE,
            MediaKey::Next => ConsumerFlags::NEXT,
            MediaKey::Prev => ConsumerFlags::PREV,
        }
    }
}

/// Three-bit consumer-control mask.
///
/// Bit layout:
/// - Bit 0: Play/Pause
/// - Bit 1: Scan Next Track
/// - Bit 2: Scan Previous Track
///
/// Bits 3–7 are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct ConsumerFlags(u8);

impl ConsumerFlags {
    pub const PLAY_PAUSE: u8 = 1 << 0;
    pub const NEXT: u8 = 1 << 1;
    pub const PREV: u8 = 1 << 2;

    /// No key active.
    pub const NONE: ConsumerFlags = ConsumerFlags(0);

    /// Mask with only `key` active.
    pub fn pressed(key: MediaKey) -> Self {
        ConsumerFlags(key.flag())
    }

    /// Returns `true` if `key` is active.
    pub fn contains(self, key: MediaKey) -> bool {
        self.0 & key.flag() != 0
    }

    /// Raw flag byte as it appears in the consumer report.
    pub fn bits(self) -> u8 {
        self.0
    }
}
