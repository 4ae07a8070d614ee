use crate::{
    Catalog, Config, Transport,
    domain::Track,
    error::{CatalogError, MediaLoadError},
    key_handler::{self, Action},
    overwrite_line,
    player::{PlayerEvent, PlayerHandle},
    tui,
    ui_state::UiState,
};
use anyhow::{Context, Result, anyhow};
use ratatui::crossterm::event::{Event, KeyEventKind};
use std::sync::Arc;

pub struct Cadenza {
    catalog: Catalog,
    transport: Transport,
    player: PlayerHandle,
    ui: UiState,

    // Consecutive failed loads; skip-forward gives up after one full
    // cycle so an all-bad catalog cannot advance forever.
    load_failures: usize,
}

impl Cadenza {
    pub fn new() -> Result<Self> {
        let config = Config::load();

        let catalog = match Catalog::load(&config.music_dir) {
            Ok(catalog) => catalog,
            Err(e @ CatalogError::DirectoryUnavailable { .. }) => {
                eprintln!("warning: {e}; starting with an empty catalog");
                Catalog::empty()
            }
            Err(other) => return Err(other.into()),
        };

        // An empty catalog fails here, before any audio engine exists.
        let transport = Transport::new(catalog.len())
            .with_context(|| format!("No tracks found in {}", config.music_dir.display()))?;

        let player = PlayerHandle::spawn()?;
        let ui = UiState::new(catalog.names());

        Ok(Cadenza {
            catalog,
            transport,
            player,
            ui,
            load_failures: 0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        self.bind_initial()?;

        let mut terminal = ratatui::init();
        terminal.clear()?;

        // MAIN ROUTINE
        loop {
            match key_handler::next_event()? {
                Some(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    if let Some(action) = key_handler::handle_key_event(key, &self.ui) {
                        if let Err(e) = self.handle_action(action) {
                            self.ui.set_error(e);
                        }
                    }
                }
                _ => (),
            }

            if let Err(e) = self.drain_player_events() {
                self.ui.set_error(e);
            }

            self.sync_ui();
            terminal.draw(|f| tui::render(f, &mut self.ui))?;

            if self.ui.quit {
                let _ = self.player.pause();
                break;
            }
        }

        ratatui::restore();
        overwrite_line("Thanks for listening!\n\n");

        Ok(())
    }
}

impl Cadenza {
    #[rustfmt::skip]
    fn handle_action(&mut self, action: Action) -> Result<()> {
        match action {
            // Transport
            Action::Play         => self.play()?,
            Action::Stop         => self.stop()?,
            Action::Reset        => self.reset()?,
            Action::PlayNext     => self.play_next()?,
            Action::PlayPrev     => self.play_prev()?,

            // Speed & volume
            Action::SpeedUp      => self.player.set_rate(self.transport.speed_up())?,
            Action::SpeedDown    => self.player.set_rate(self.transport.speed_down())?,
            Action::VolumeUp     => self.player.set_volume(self.transport.volume_up())?,
            Action::VolumeDown   => self.player.set_volume(self.transport.volume_down())?,

            // Ops
            Action::DismissError => self.ui.clear_error(),
            Action::QUIT         => self.ui.quit = true,
        }
        Ok(())
    }
}

impl Cadenza {
    /// Bind track 0 paused, so play starts instantly and the label and
    /// duration are known up front.
    fn bind_initial(&mut self) -> Result<()> {
        let generation = self.transport.bind_initial();
        let track = self.current_track()?;

        self.player.load(track, generation)?;
        self.player.set_volume(self.transport.volume_level())?;
        Ok(())
    }

    fn current_track(&self) -> Result<Arc<Track>> {
        self.catalog
            .get(self.transport.index())
            .cloned()
            .ok_or_else(|| anyhow!("Track index out of range"))
    }

    fn play(&mut self) -> Result<()> {
        if let Some(rate) = self.transport.play() {
            // A reloaded sink starts back at 1.0x, so the speed selection
            // is re-applied before every resume.
            self.player.set_rate(rate)?;
            self.player.play()?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.transport.stop() {
            self.player.pause()?;
        }
        Ok(())
    }

    fn reset(&mut self) -> Result<()> {
        if self.transport.reset() {
            self.ui.progress = 0.0;
            self.player.reset()?;
        }
        Ok(())
    }

    fn play_next(&mut self) -> Result<()> {
        match self.transport.next() {
            Some((_, generation)) => self.load_and_play(generation),
            None => Ok(()),
        }
    }

    fn play_prev(&mut self) -> Result<()> {
        match self.transport.previous() {
            Some((_, generation)) => self.load_and_play(generation),
            None => Ok(()),
        }
    }

    fn load_and_play(&mut self, generation: u64) -> Result<()> {
        let track = self.current_track()?;

        self.ui.progress = 0.0;
        self.ui.duration = None;

        self.player.load(track, generation)?;
        self.play()
    }
}

impl Cadenza {
    fn drain_player_events(&mut self) -> Result<()> {
        for event in self.player.poll_events() {
            match event {
                PlayerEvent::TrackStarted {
                    generation,
                    duration,
                } if generation == self.transport.generation() => {
                    self.load_failures = 0;
                    self.ui.duration = duration;
                }

                PlayerEvent::Progress {
                    generation,
                    fraction,
                } if generation == self.transport.generation() => {
                    self.ui.progress = fraction;
                }

                // Same path as a user-initiated next. The transport drops
                // signals from before the latest load.
                PlayerEvent::TrackEnded { generation } => {
                    if self.transport.track_ended(generation) {
                        self.play_next()?;
                    }
                }

                PlayerEvent::LoadFailed { generation, error }
                    if generation == self.transport.generation() =>
                {
                    self.handle_load_failure(error)?;
                }

                // Anything else is from a superseded load generation.
                _ => (),
            }
        }
        Ok(())
    }

    fn handle_load_failure(&mut self, error: MediaLoadError) -> Result<()> {
        self.load_failures += 1;
        self.ui.set_error(anyhow::Error::from(error));

        if self.load_failures < self.catalog.len() {
            self.play_next()?;
        } else {
            // Every track failed in a row; stay stopped on the current one.
            self.load_failures = 0;
        }
        Ok(())
    }

    fn sync_ui(&mut self) {
        self.ui.state = self.transport.state();
        self.ui.speed_percent = self.transport.speed_percent();
        self.ui.volume = self.transport.volume();
        self.ui.list_pos.select(Some(self.transport.index()));

        if let Some(track) = self.catalog.get(self.transport.index())
            && self.ui.track_label != track.name
        {
            self.ui.track_label = track.name.clone();
        }
    }
}
