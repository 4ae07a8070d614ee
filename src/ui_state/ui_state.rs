use crate::transport::TransportState;
use ratatui::widgets::ListState;
use std::time::Duration;

/// Display snapshot the widgets render from. The app copies transport
/// facts in here once per frame; widgets read, never write back.
pub struct UiState {
    pub track_names: Vec<String>,
    pub track_label: String,
    pub state: TransportState,

    /// Completed share of the current track, 0.0..=1.0.
    pub progress: f64,
    pub duration: Option<Duration>,

    pub speed_percent: u16,
    pub volume: u8,

    pub list_pos: ListState,
    error: Option<String>,
    pub quit: bool,
}

impl UiState {
    pub fn new(track_names: Vec<String>) -> Self {
        let mut list_pos = ListState::default();
        list_pos.select(Some(0));

        UiState {
            track_names,
            track_label: String::new(),
            state: TransportState::Idle,
            progress: 0.0,
            duration: None,
            speed_percent: 100,
            volume: 0,
            list_pos,
            error: None,
            quit: false,
        }
    }

    pub fn state_label(&self) -> &'static str {
        match self.state {
            TransportState::Idle => "idle",
            TransportState::Stopped => "stopped",
            TransportState::Playing => "playing",
        }
    }

    /// Elapsed time derived from the published fraction. Only as fresh as
    /// the last progress sample.
    pub fn elapsed(&self) -> Option<Duration> {
        self.duration.map(|d| d.mul_f64(self.progress))
    }

    pub fn set_error(&mut self, error: anyhow::Error) {
        self.error = Some(format!("{error:#}"));
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_tracks_the_published_fraction() {
        let mut ui = UiState::new(vec!["a.mp3".into()]);
        ui.duration = Some(Duration::from_secs(100));
        ui.progress = 0.25;

        assert_eq!(ui.elapsed(), Some(Duration::from_secs(25)));
    }

    #[test]
    fn elapsed_is_unknown_without_a_duration() {
        let mut ui = UiState::new(vec!["a.mp3".into()]);
        ui.progress = 0.5;

        assert_eq!(ui.elapsed(), None);
    }

    #[test]
    fn errors_are_set_and_cleared() {
        let mut ui = UiState::new(Vec::new());
        assert!(ui.error().is_none());

        ui.set_error(anyhow::anyhow!("boom"));
        assert_eq!(ui.error(), Some("boom"));

        ui.clear_error();
        assert!(ui.error().is_none());
    }
}
