mod action;

pub use action::{handle_key_event, next_event};

use ratatui::crossterm::event::KeyModifiers;

pub(crate) const X: KeyModifiers = KeyModifiers::NONE;
pub(crate) const S: KeyModifiers = KeyModifiers::SHIFT;
pub(crate) const C: KeyModifiers = KeyModifiers::CONTROL;

#[derive(PartialEq, Eq, Debug)]
pub enum Action {
    // Transport
    Play,
    Stop,
    Reset,
    PlayNext,
    PlayPrev,

    // Speed & volume
    SpeedUp,
    SpeedDown,
    VolumeUp,
    VolumeDown,

    // Errors & other
    DismissError,
    QUIT,
}
