use super::{DEFAULT_VOLUME, SPEED_SCALE, SPEEDS, VOLUME_SCALE, VOLUME_STEP};
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportState {
    /// Before the first track is bound.
    Idle,
    Stopped,
    Playing,
}

/// The transport state machine. Owns the current track index, the playing
/// state, the speed selection, and the volume setting. All mutation goes
/// through the transition methods below; the UI layer renders from a
/// snapshot and never reaches in here directly.
///
/// Every (re)bind of a track bumps `generation`. Player events carry the
/// generation they were produced under, so an end-of-track signal that
/// raced a manual track change is recognised as stale and dropped instead
/// of advancing the index a second time.
pub struct Transport {
    state: TransportState,
    index: usize,
    track_count: usize,
    generation: u64,

    /// Selected speed in percent. `None` means the 1.0x default.
    speed: Option<u16>,
    /// Raw volume in 0..=100.
    volume: u8,
}

impl Transport {
    pub fn new(track_count: usize) -> Result<Self, CatalogError> {
        if track_count == 0 {
            return Err(CatalogError::EmptyCatalog);
        }

        Ok(Transport {
            state: TransportState::Idle,
            index: 0,
            track_count,
            generation: 0,
            speed: None,
            volume: DEFAULT_VOLUME,
        })
    }

    pub fn state(&self) -> TransportState {
        self.state
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Binds track 0 and leaves the transport stopped. Only meaningful
    /// once, at initialization.
    pub fn bind_initial(&mut self) -> u64 {
        if self.state == TransportState::Idle {
            self.state = TransportState::Stopped;
            self.generation += 1;
        }
        self.generation
    }

    /// Stopped -> Playing. Returns the rate multiplier to re-apply before
    /// resuming; a freshly loaded sink always starts back at 1.0x.
    pub fn play(&mut self) -> Option<f32> {
        match self.state {
            TransportState::Stopped => {
                self.state = TransportState::Playing;
                Some(self.rate_multiplier())
            }
            _ => None,
        }
    }

    /// Playing -> Stopped, position retained. Returns false when there was
    /// nothing to stop.
    pub fn stop(&mut self) -> bool {
        match self.state {
            TransportState::Playing => {
                self.state = TransportState::Stopped;
                true
            }
            _ => false,
        }
    }

    /// Rewind to zero and stay stopped. Reset never resumes playback,
    /// even when it interrupts a playing track.
    pub fn reset(&mut self) -> bool {
        match self.state {
            TransportState::Idle => false,
            _ => {
                self.state = TransportState::Stopped;
                true
            }
        }
    }

    /// Advance with wraparound. The caller loads the returned index and
    /// then calls `play`; a track change always resumes playback.
    pub fn next(&mut self) -> Option<(usize, u64)> {
        self.advance_to((self.index + 1) % self.track_count)
    }

    pub fn previous(&mut self) -> Option<(usize, u64)> {
        self.advance_to((self.index + self.track_count - 1) % self.track_count)
    }

    fn advance_to(&mut self, index: usize) -> Option<(usize, u64)> {
        if self.state == TransportState::Idle {
            return None;
        }

        self.index = index;
        self.generation += 1;
        self.state = TransportState::Stopped;
        Some((self.index, self.generation))
    }

    /// An end-of-track signal for `generation`. True when the signal is
    /// current and the transport was playing; stale signals from before a
    /// track swap are dropped so one boundary never advances twice.
    pub fn track_ended(&mut self, generation: u64) -> bool {
        generation == self.generation && self.state == TransportState::Playing
    }
}

// =====================
//    SPEED & VOLUME
// =====================
impl Transport {
    pub fn rate_multiplier(&self) -> f32 {
        match self.speed {
            Some(percent) => f32::from(percent) * SPEED_SCALE,
            None => 1.0,
        }
    }

    pub fn speed_percent(&self) -> u16 {
        self.speed.unwrap_or(100)
    }

    /// Step to the next faster entry in SPEEDS, saturating at the top.
    /// Returns the new multiplier for immediate application.
    pub fn speed_up(&mut self) -> f32 {
        let current = self.speed_percent();
        let next = SPEEDS
            .iter()
            .copied()
            .find(|&s| s > current)
            .unwrap_or(current);
        self.speed = Some(next);
        self.rate_multiplier()
    }

    pub fn speed_down(&mut self) -> f32 {
        let current = self.speed_percent();
        let next = SPEEDS
            .iter()
            .rev()
            .copied()
            .find(|&s| s < current)
            .unwrap_or(current);
        self.speed = Some(next);
        self.rate_multiplier()
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Raw volume scaled to the engine's 0.0..=1.0 level.
    pub fn volume_level(&self) -> f32 {
        f32::from(self.volume) * VOLUME_SCALE
    }

    pub fn volume_up(&mut self) -> f32 {
        self.volume = self.volume.saturating_add(VOLUME_STEP).min(100);
        self.volume_level()
    }

    pub fn volume_down(&mut self) -> f32 {
        self.volume = self.volume.saturating_sub(VOLUME_STEP);
        self.volume_level()
    }
}
