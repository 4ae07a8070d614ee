use crate::{domain::Track, error::CatalogError};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use walkdir::WalkDir;

/// Ordered list of tracks, built once at startup. Entries are sorted
/// lexicographically by file name so the listing order is reproducible
/// across platforms and filesystems.
pub struct Catalog {
    tracks: Vec<Arc<Track>>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog { tracks: Vec::new() }
    }

    /// Scans `dir` one level deep. Sub-directories are skipped, not
    /// descended into. A missing or unreadable directory is reported as
    /// `DirectoryUnavailable` so the caller can decide how loudly to
    /// degrade.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();

        // Probe up front so a missing or unreadable root is reported
        // instead of silently scanning nothing.
        std::fs::read_dir(dir).map_err(|source| CatalogError::DirectoryUnavailable {
            dir: dir.to_path_buf(),
            source,
        })?;

        let mut tracks = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| CatalogError::DirectoryUnavailable {
                dir: dir.to_path_buf(),
                source: e
                    .into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("unreadable entry")),
            })?;

            if entry.file_type().is_file() {
                tracks.push(Arc::new(Track::new(entry.into_path())));
            }
        }

        Ok(Catalog { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Track>> {
        self.tracks.get(index)
    }

    pub fn names(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.name.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        File::create(&path).unwrap();
        path
    }

    #[test]
    fn entries_are_sorted_by_file_name() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "c.mp3");
        touch(dir.path(), "a.mp3");
        touch(dir.path(), "b.mp3");

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.names(), vec!["a.mp3", "b.mp3", "c.mp3"]);
    }

    #[test]
    fn scan_is_not_recursive() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "top.mp3");
        let sub = dir.path().join("nested");
        std::fs::create_dir(&sub).unwrap();
        touch(&sub, "buried.mp3");

        let catalog = Catalog::load(dir.path()).unwrap();
        assert_eq!(catalog.names(), vec!["top.mp3"]);
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("not-here");

        let err = match Catalog::load(&gone) {
            Err(e) => e,
            Ok(_) => panic!("expected DirectoryUnavailable"),
        };
        match err {
            CatalogError::DirectoryUnavailable { dir, .. } => assert_eq!(dir, gone),
            other => panic!("expected DirectoryUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn labels_follow_the_transport_through_wraparound() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "A.mp3");
        touch(dir.path(), "B.mp3");
        touch(dir.path(), "C.mp3");

        let catalog = Catalog::load(dir.path()).unwrap();
        let mut transport = crate::Transport::new(catalog.len()).unwrap();
        transport.bind_initial();

        transport.next();
        assert_eq!(catalog.get(transport.index()).unwrap().name, "B.mp3");

        transport.previous();
        transport.previous();
        assert_eq!(catalog.get(transport.index()).unwrap().name, "C.mp3");
    }

    #[test]
    fn empty_directory_loads_as_empty_catalog() {
        let dir = tempfile::tempdir().unwrap();

        let catalog = Catalog::load(dir.path()).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.get(0).is_none());
    }
}
