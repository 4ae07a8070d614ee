use crate::{REFRESH_RATE, key_handler::*, ui_state::UiState};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};
use std::time::Duration;

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    // An open error popup swallows everything except dismissal and quit.
    if state.error().is_some() {
        return match (key_event.modifiers, key_event.code) {
            (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),
            (X, Esc) | (X, Enter) => Some(Action::DismissError),
            _ => None,
        };
    }

    match (key_event.modifiers, key_event.code) {
        (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),

        // TRANSPORT
        (X, Char(' ')) | (X, Enter) => Some(Action::Play),
        (X, Char('s')) => Some(Action::Stop),
        (X, Char('r')) => Some(Action::Reset),

        (X, Char('n')) | (X, Right) => Some(Action::PlayNext),
        (X, Char('p')) | (X, Left) => Some(Action::PlayPrev),

        // SPEED
        (X, Char(']')) => Some(Action::SpeedUp),
        (X, Char('[')) => Some(Action::SpeedDown),

        // VOLUME
        (X, Char('=')) | (S, Char('+')) | (X, Up) => Some(Action::VolumeUp),
        (X, Char('-')) | (X, Down) => Some(Action::VolumeDown),

        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(Duration::from_millis(REFRESH_RATE))? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}
