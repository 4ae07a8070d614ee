use super::{AudioEngine, PlayerCommand, PlayerEvent, ProgressPoller, poller};
use crate::{REFRESH_RATE, domain::Track};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use std::{
    sync::Arc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Worker thread that owns the engine and the progress poller. Commands
/// arrive over the channel; everything going the other way is an event.
/// The UI thread never touches the engine directly.
pub struct PlayerCore {
    engine: Box<dyn AudioEngine>,
    commands: Receiver<PlayerCommand>,
    events: Sender<PlayerEvent>,
    poller: ProgressPoller,

    // Generation of the currently loaded track. `None` once the track has
    // finished, which is what keeps TrackEnded to one emission per load.
    current: Option<u64>,
    volume: f32,
}

impl PlayerCore {
    pub(crate) fn new(
        engine: Box<dyn AudioEngine>,
        commands: Receiver<PlayerCommand>,
        events: Sender<PlayerEvent>,
    ) -> Self {
        PlayerCore {
            engine,
            commands,
            events,
            poller: ProgressPoller::new(),
            current: None,
            volume: 1.0,
        }
    }

    pub(crate) fn spawn(
        engine: Box<dyn AudioEngine>,
        commands: Receiver<PlayerCommand>,
        events: Sender<PlayerEvent>,
    ) -> JoinHandle<()> {
        thread::spawn(move || {
            let mut core = PlayerCore::new(engine, commands, events);
            core.run();
        })
    }

    fn run(&mut self) {
        loop {
            if !self.drain_commands() {
                // Handle dropped; the app is shutting down.
                break;
            }

            self.tick(Instant::now());
            self.check_track_end();
            thread::sleep(Duration::from_millis(REFRESH_RATE));
        }
    }

    /// Returns false once the command channel has disconnected.
    fn drain_commands(&mut self) -> bool {
        loop {
            match self.commands.try_recv() {
                Ok(cmd) => self.apply(cmd),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn apply(&mut self, cmd: PlayerCommand) {
        match cmd {
            PlayerCommand::Load { track, generation } => self.load_track(&track, generation),
            PlayerCommand::Play => {
                self.engine.resume();
                self.poller.start(Instant::now());
            }
            PlayerCommand::Pause => {
                self.engine.pause();
                self.poller.stop();
            }
            PlayerCommand::Reset => self.reset(),
            PlayerCommand::SetRate(multiplier) => self.engine.set_rate(multiplier),
            PlayerCommand::SetVolume(level) => {
                self.volume = level;
                self.engine.set_volume(level);
            }
        }
    }

    fn load_track(&mut self, track: &Arc<Track>, generation: u64) {
        // The previous poller must be fully stopped before the new track
        // gets one; two schedules would race on the progress indicator.
        self.poller.stop();
        self.current = None;

        match self.engine.load(&track.path) {
            Ok(()) => {
                // A fresh sink starts at the engine default volume.
                self.engine.set_volume(self.volume);
                self.current = Some(generation);
                self.emit(PlayerEvent::TrackStarted {
                    generation,
                    duration: self.engine.duration(),
                });
            }
            Err(error) => self.emit(PlayerEvent::LoadFailed { generation, error }),
        }
    }

    fn reset(&mut self) {
        self.engine.seek_to_start();
        self.engine.pause();
        self.poller.stop();

        if let Some(generation) = self.current {
            self.emit(PlayerEvent::Progress {
                generation,
                fraction: 0.0,
            });
        }
    }

    fn tick(&mut self, now: Instant) {
        if !self.poller.due(now) {
            return;
        }
        let Some(generation) = self.current else {
            return;
        };

        // Unknown or zero duration: skip the sample entirely.
        let Some(fraction) = poller::fraction(self.engine.position(), self.engine.duration())
        else {
            return;
        };

        self.emit(PlayerEvent::Progress {
            generation,
            fraction,
        });

        if fraction >= 1.0 {
            self.poller.stop();
            self.finish_track();
        }
    }

    fn check_track_end(&mut self) {
        // The engine's own end-of-stream signal. Checking `current` keeps
        // this from re-firing after the poller boundary already finished
        // the track.
        if self.current.is_some() && self.engine.track_ended() {
            self.poller.stop();
            self.finish_track();
        }
    }

    fn finish_track(&mut self) {
        if let Some(generation) = self.current.take() {
            self.emit(PlayerEvent::TrackEnded { generation });
        }
    }

    fn emit(&self, event: PlayerEvent) {
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaLoadError;
    use crossbeam_channel::unbounded;
    use std::{
        path::{Path, PathBuf},
        sync::Mutex,
    };

    #[derive(Default)]
    struct FakeState {
        loaded: Vec<PathBuf>,
        volume_calls: Vec<f32>,
        rate_calls: Vec<f32>,
        paused: bool,
        position: Duration,
        duration: Option<Duration>,
        ended: bool,
        fail_next_load: bool,
    }

    struct FakeEngine {
        state: Arc<Mutex<FakeState>>,
    }

    impl FakeEngine {
        fn new() -> (Self, Arc<Mutex<FakeState>>) {
            let state = Arc::new(Mutex::new(FakeState {
                paused: true,
                ..FakeState::default()
            }));
            (
                FakeEngine {
                    state: Arc::clone(&state),
                },
                state,
            )
        }
    }

    impl AudioEngine for FakeEngine {
        fn load(&mut self, path: &Path) -> Result<(), MediaLoadError> {
            let mut state = self.state.lock().unwrap();
            if state.fail_next_load {
                return Err(MediaLoadError::Open {
                    path: path.to_path_buf(),
                    source: std::io::Error::other("scripted failure"),
                });
            }
            state.loaded.push(path.to_path_buf());
            state.paused = true;
            state.position = Duration::ZERO;
            state.ended = false;
            Ok(())
        }

        fn resume(&mut self) {
            self.state.lock().unwrap().paused = false;
        }

        fn pause(&mut self) {
            self.state.lock().unwrap().paused = true;
        }

        fn seek_to_start(&mut self) {
            self.state.lock().unwrap().position = Duration::ZERO;
        }

        fn set_rate(&mut self, multiplier: f32) {
            self.state.lock().unwrap().rate_calls.push(multiplier);
        }

        fn set_volume(&mut self, level: f32) {
            self.state.lock().unwrap().volume_calls.push(level);
        }

        fn position(&self) -> Duration {
            self.state.lock().unwrap().position
        }

        fn duration(&self) -> Option<Duration> {
            self.state.lock().unwrap().duration
        }

        fn track_ended(&self) -> bool {
            self.state.lock().unwrap().ended
        }
    }

    fn test_core() -> (
        PlayerCore,
        Arc<Mutex<FakeState>>,
        crossbeam_channel::Receiver<PlayerEvent>,
    ) {
        let (engine, state) = FakeEngine::new();
        let (_cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, evt_rx) = unbounded();
        let core = PlayerCore::new(Box::new(engine), cmd_rx, evt_tx);
        (core, state, evt_rx)
    }

    fn track(name: &str) -> Arc<Track> {
        Arc::new(Track::new(PathBuf::from(format!("/music/{name}"))))
    }

    fn drain(rx: &crossbeam_channel::Receiver<PlayerEvent>) -> Vec<PlayerEvent> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    fn count_ended(events: &[PlayerEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, PlayerEvent::TrackEnded { .. }))
            .count()
    }

    #[test]
    fn load_emits_started_with_duration() {
        let (mut core, state, rx) = test_core();
        state.lock().unwrap().duration = Some(Duration::from_secs(90));

        core.load_track(&track("a.mp3"), 1);

        let events = drain(&rx);
        assert!(matches!(
            events[..],
            [PlayerEvent::TrackStarted {
                generation: 1,
                duration: Some(d)
            }] if d == Duration::from_secs(90)
        ));
    }

    #[test]
    fn volume_is_reapplied_on_every_load() {
        let (mut core, state, _rx) = test_core();

        core.apply(PlayerCommand::SetVolume(0.5));
        core.load_track(&track("a.mp3"), 1);
        core.load_track(&track("b.mp3"), 2);

        let calls = state.lock().unwrap().volume_calls.clone();
        assert_eq!(calls, vec![0.5, 0.5, 0.5]);
    }

    #[test]
    fn boundary_advances_exactly_once_when_both_signals_fire() {
        let (mut core, state, rx) = test_core();
        {
            let mut s = state.lock().unwrap();
            s.duration = Some(Duration::from_secs(10));
        }

        let now = Instant::now();
        core.load_track(&track("a.mp3"), 1);
        core.apply(PlayerCommand::Play);

        {
            let mut s = state.lock().unwrap();
            s.position = Duration::from_secs(10);
            s.ended = true;
        }

        // Poller boundary and the engine's own signal, same wake.
        core.tick(now + Duration::from_secs(2));
        core.check_track_end();
        core.check_track_end();

        let events = drain(&rx);
        assert_eq!(count_ended(&events), 1);
    }

    #[test]
    fn engine_signal_alone_finishes_the_track_once() {
        let (mut core, state, rx) = test_core();

        core.load_track(&track("a.mp3"), 1);
        core.apply(PlayerCommand::Play);
        state.lock().unwrap().ended = true;

        core.check_track_end();
        core.check_track_end();
        core.tick(Instant::now() + Duration::from_secs(5));

        let events = drain(&rx);
        assert_eq!(count_ended(&events), 1);
    }

    #[test]
    fn unknown_duration_skips_progress_updates() {
        let (mut core, state, rx) = test_core();
        state.lock().unwrap().duration = None;

        let now = Instant::now();
        core.load_track(&track("a.mp3"), 1);
        core.apply(PlayerCommand::Play);
        state.lock().unwrap().position = Duration::from_secs(5);

        core.tick(now + Duration::from_secs(2));

        let events = drain(&rx);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, PlayerEvent::Progress { .. }))
        );
    }

    #[test]
    fn failed_load_reports_and_leaves_nothing_current() {
        let (mut core, state, rx) = test_core();
        state.lock().unwrap().fail_next_load = true;

        core.load_track(&track("bad.mp3"), 3);
        state.lock().unwrap().ended = true;
        core.check_track_end();

        let events = drain(&rx);
        assert!(matches!(
            events[..],
            [PlayerEvent::LoadFailed { generation: 3, .. }]
        ));
    }

    #[test]
    fn reset_zeroes_progress_and_stops_the_poller() {
        let (mut core, state, rx) = test_core();
        state.lock().unwrap().duration = Some(Duration::from_secs(10));

        let now = Instant::now();
        core.load_track(&track("a.mp3"), 1);
        core.apply(PlayerCommand::Play);
        assert!(core.poller.is_running());
        drain(&rx);

        state.lock().unwrap().position = Duration::from_secs(4);
        core.apply(PlayerCommand::Reset);

        assert!(!core.poller.is_running());
        assert!(state.lock().unwrap().paused);
        assert_eq!(state.lock().unwrap().position, Duration::ZERO);

        let events = drain(&rx);
        assert!(matches!(
            events[..],
            [PlayerEvent::Progress {
                generation: 1,
                fraction
            }] if fraction == 0.0
        ));
        // Reset never restarts playback on its own.
        core.tick(now + Duration::from_secs(2));
        assert!(drain(&rx).is_empty());
    }

    #[test]
    fn loading_stops_the_previous_poller_before_starting_over() {
        let (mut core, state, rx) = test_core();
        state.lock().unwrap().duration = Some(Duration::from_secs(10));

        core.load_track(&track("a.mp3"), 1);
        core.apply(PlayerCommand::Play);
        assert!(core.poller.is_running());

        core.load_track(&track("b.mp3"), 2);
        assert!(!core.poller.is_running());

        // A stale tick after the swap publishes nothing for the old track.
        core.tick(Instant::now() + Duration::from_secs(3));
        let events = drain(&rx);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, PlayerEvent::Progress { generation: 1, .. }))
        );
    }
}
