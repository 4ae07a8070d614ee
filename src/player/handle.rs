use super::{PlayerCommand, PlayerEvent, RodioEngine, core::PlayerCore};
use crate::domain::Track;
use anyhow::{Context, Result};
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::{sync::Arc, thread::JoinHandle};

/// UI-thread endpoint of the player. One method per command; events are
/// drained without blocking once per frame.
pub struct PlayerHandle {
    commands: Sender<PlayerCommand>,
    events: Receiver<PlayerEvent>,
    _thread_handle: JoinHandle<()>,
}

impl PlayerHandle {
    pub fn spawn() -> Result<Self> {
        let engine = RodioEngine::new().context("Could not open an audio output stream")?;
        let (cmd_tx, cmd_rx) = unbounded();
        let (evt_tx, evt_rx) = unbounded();

        let thread_handle = PlayerCore::spawn(Box::new(engine), cmd_rx, evt_tx);

        Ok(Self {
            commands: cmd_tx,
            events: evt_rx,
            _thread_handle: thread_handle,
        })
    }
}

// =====================
//    COMMAND HANDLER
// =====================
impl PlayerHandle {
    pub fn load(&self, track: Arc<Track>, generation: u64) -> Result<()> {
        self.commands.send(PlayerCommand::Load { track, generation })?;
        Ok(())
    }

    pub fn play(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Play)?;
        Ok(())
    }

    pub fn pause(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Pause)?;
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.commands.send(PlayerCommand::Reset)?;
        Ok(())
    }

    pub fn set_rate(&self, multiplier: f32) -> Result<()> {
        self.commands.send(PlayerCommand::SetRate(multiplier))?;
        Ok(())
    }

    pub fn set_volume(&self, level: f32) -> Result<()> {
        self.commands.send(PlayerCommand::SetVolume(level))?;
        Ok(())
    }
}

// ===============
//    ACCESSORS
// ===============
impl PlayerHandle {
    pub fn poll_events(&self) -> Vec<PlayerEvent> {
        std::iter::from_fn(|| self.events.try_recv().ok()).collect()
    }
}
