use crate::expand_tilde;
use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_MUSIC_DIR: &str = "music";

#[derive(Deserialize)]
struct ConfigImport {
    music_dir: Option<String>,
}

pub struct Config {
    pub music_dir: PathBuf,
}

impl Config {
    /// Reads `config.toml` from the user config directory, falling back to
    /// the defaults when the file is missing or malformed.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| Self::load_from_file(p).ok())
            .unwrap_or_default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_str = std::fs::read_to_string(path.as_ref())?;
        let import = toml::from_str::<ConfigImport>(&file_str)?;
        Self::try_from(&import)
    }

    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cadenza").join("config.toml"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            music_dir: PathBuf::from(DEFAULT_MUSIC_DIR),
        }
    }
}

impl TryFrom<&ConfigImport> for Config {
    type Error = anyhow::Error;

    fn try_from(import: &ConfigImport) -> Result<Self> {
        let music_dir = match &import.music_dir {
            Some(dir) => expand_tilde(dir)?,
            None => PathBuf::from(DEFAULT_MUSIC_DIR),
        };

        Ok(Config { music_dir })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_music_dir() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "music_dir = \"/srv/audio\"").unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.music_dir, PathBuf::from("/srv/audio"));
    }

    #[test]
    fn missing_key_falls_back_to_default_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let config = Config::load_from_file(file.path()).unwrap();
        assert_eq!(config.music_dir, PathBuf::from(DEFAULT_MUSIC_DIR));
    }

    #[test]
    fn unreadable_file_is_an_error() {
        assert!(Config::load_from_file("/nonexistent/config.toml").is_err());
    }
}
