use crate::error::MediaLoadError;
use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::{fs::File, path::Path, time::Duration};

/// Seam between the player core and the host audio subsystem. Exactly one
/// sink is live at a time; `load` replaces it rather than rebinding it.
pub trait AudioEngine: Send {
    fn load(&mut self, path: &Path) -> Result<(), MediaLoadError>;
    fn resume(&mut self);
    fn pause(&mut self);
    fn seek_to_start(&mut self);
    fn set_rate(&mut self, multiplier: f32);
    fn set_volume(&mut self, level: f32);
    fn position(&self) -> Duration;
    fn duration(&self) -> Option<Duration>;
    fn track_ended(&self) -> bool;
}

pub struct RodioEngine {
    sink: Option<Sink>,
    duration: Option<Duration>,
    _stream: OutputStream,
}

impl RodioEngine {
    pub fn new() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()?;

        Ok(RodioEngine {
            sink: None,
            duration: None,
            _stream: stream,
        })
    }
}

impl AudioEngine for RodioEngine {
    fn load(&mut self, path: &Path) -> Result<(), MediaLoadError> {
        // The old sink never outlives a load attempt, even a failed one.
        if let Some(old) = self.sink.take() {
            old.stop();
        }
        self.duration = None;

        let file = File::open(path).map_err(|source| MediaLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::try_from(file).map_err(|source| MediaLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        self.duration = source.total_duration();

        let sink = Sink::connect_new(self._stream.mixer());
        sink.pause();
        sink.append(source);
        self.sink = Some(sink);

        Ok(())
    }

    fn resume(&mut self) {
        if let Some(sink) = &self.sink {
            sink.play();
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn seek_to_start(&mut self) {
        if let Some(sink) = &self.sink {
            let _ = sink.try_seek(Duration::ZERO);
        }
    }

    fn set_rate(&mut self, multiplier: f32) {
        if let Some(sink) = &self.sink {
            sink.set_speed(multiplier);
        }
    }

    fn set_volume(&mut self, level: f32) {
        if let Some(sink) = &self.sink {
            sink.set_volume(level);
        }
    }

    fn position(&self) -> Duration {
        self.sink.as_ref().map(|s| s.get_pos()).unwrap_or_default()
    }

    fn duration(&self) -> Option<Duration> {
        self.duration
    }

    fn track_ended(&self) -> bool {
        self.sink.as_ref().is_some_and(|s| s.empty())
    }
}
