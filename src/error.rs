use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    /// Fatal at startup. The player thread is never spawned when this fires.
    #[error("no tracks found in the music directory")]
    EmptyCatalog,

    #[error("music directory unavailable: {}", dir.display())]
    DirectoryUnavailable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum MediaLoadError {
    #[error("could not open {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not decode {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },
}
