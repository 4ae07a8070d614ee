mod transport;

pub use transport::{Transport, TransportState};

/// Selectable playback speeds, in percent.
pub const SPEEDS: [u16; 8] = [25, 50, 75, 100, 125, 150, 175, 200];

/// Speed percent to engine rate multiplier.
pub const SPEED_SCALE: f32 = 0.01;

/// Raw volume (0..=100) to engine level. Independent of SPEED_SCALE even
/// though the values match today; the quantities are unrelated.
pub const VOLUME_SCALE: f32 = 0.01;

pub const DEFAULT_VOLUME: u8 = 80;
pub const VOLUME_STEP: u8 = 5;
