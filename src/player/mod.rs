mod core;
mod engine;
mod handle;
mod poller;

use crate::{domain::Track, error::MediaLoadError};
use std::{sync::Arc, time::Duration};

pub use engine::{AudioEngine, RodioEngine};
pub use handle::PlayerHandle;
pub use poller::{ProgressPoller, fraction};

/// Progress samples are published once per second.
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

pub enum PlayerCommand {
    Load {
        track: Arc<Track>,
        generation: u64,
    },
    Play,
    Pause,
    Reset,
    SetRate(f32),
    SetVolume(f32),
}

/// Everything the worker tells the UI thread. Each event carries the load
/// generation it was produced under so stale ones can be discarded after
/// a track swap.
pub enum PlayerEvent {
    TrackStarted {
        generation: u64,
        duration: Option<Duration>,
    },
    Progress {
        generation: u64,
        fraction: f64,
    },
    TrackEnded {
        generation: u64,
    },
    LoadFailed {
        generation: u64,
        error: MediaLoadError,
    },
}
