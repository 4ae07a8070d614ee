use anyhow::{Result, anyhow};
use ratatui::crossterm::{
    ExecutableCommand,
    cursor::MoveToColumn,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

pub mod app_core;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod error;
pub mod key_handler;
pub mod player;
pub mod transport;
pub mod tui;
pub mod ui_state;

pub use catalog::Catalog;
pub use config::Config;
pub use transport::Transport;

// ~30fps
pub const REFRESH_RATE: u64 = 33;

pub fn get_readable_duration(duration: Duration) -> String {
    let mut secs = duration.as_secs();
    let mins = secs / 60;
    secs %= 60;

    format!("{mins}:{secs:02}")
}

pub fn overwrite_line(message: &str) {
    let mut stdout = std::io::stdout();
    stdout
        .execute(MoveToColumn(0))
        .unwrap()
        .execute(Clear(ClearType::CurrentLine))
        .unwrap()
        .execute(Print(message))
        .unwrap();
    stdout.flush().unwrap();
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str == "~" {
        return Err(anyhow!(
            "Setting the home directory would read every file in your system. Please provide a more specific path!"
        ));
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Error reading directory with tilde (~)"))
}
