//! The artifact store: serving directory plus artifact-id counter.
//!
//! Artifact names are strictly increasing integers (`1.mp4`, `2.mp4`, ...).
//! The counter lives in the store, not in the directory listing: deriving
//! the next name from the current file count lets two concurrent requests
//! compute the same name and overwrite each other. The counter is seeded
//! from the highest existing name so numbering keeps increasing across
//! restarts, including after deletions.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::info;

/// Owns the serving directory and hands out artifact ids.
pub struct ArtifactStore {
    dir: PathBuf,
    next_id: AtomicU64,
}

impl ArtifactStore {
    /// Open (creating if necessary) the serving directory and seed the
    /// counter after the highest `<n>.mp4` already present.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let mut highest = 0u64;
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("mp4") {
                continue;
            }
            if let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                highest = highest.max(id);
            }
        }

        info!(
            "Opened artifact store at {} (next id: {})",
            dir.display(),
            highest + 1
        );
        Ok(Self {
            dir,
            next_id: AtomicU64::new(highest + 1),
        })
    }

    /// Claim the next artifact id. Each call returns a fresh id; ids are
    /// strictly increasing for the lifetime of the store.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    /// The serving path an artifact with this id lives at.
    pub fn path_for(&self, id: u64) -> PathBuf {
        self.dir.join(format!("{id}.mp4"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Number of artifacts currently in the serving directory.
    pub fn artifact_count(&self) -> std::io::Result<usize> {
        let mut count = 0;
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("mp4") {
                count += 1;
            }
        }
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fresh_store_starts_at_one() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::open(dir.path().join("videos")).unwrap();
        assert_eq!(store.next_id(), 1);
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();

        let a = store.next_id();
        let b = store.next_id();
        let c = store.next_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_counter_resumes_after_highest_existing_name() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.mp4"), b"x").unwrap();
        fs::write(dir.path().join("7.mp4"), b"x").unwrap();

        let store = ArtifactStore::open(dir.path()).unwrap();
        assert_eq!(store.next_id(), 8);
    }

    #[test]
    fn test_non_artifact_files_are_ignored_when_seeding() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("3.mp4"), b"x").unwrap();
        fs::write(dir.path().join("99.txt"), b"x").unwrap();
        fs::write(dir.path().join("notes.mp4"), b"x").unwrap();

        let store = ArtifactStore::open(dir.path()).unwrap();
        assert_eq!(store.next_id(), 4);
    }

    #[test]
    fn test_path_for_uses_id_and_extension() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::open(dir.path()).unwrap();
        assert_eq!(store.path_for(5), dir.path().join("5.mp4"));
    }

    #[test]
    fn test_artifact_count_counts_only_videos() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("1.mp4"), b"x").unwrap();
        fs::write(dir.path().join("history.jsonl"), b"x").unwrap();

        let store = ArtifactStore::open(dir.path()).unwrap();
        assert_eq!(store.artifact_count().unwrap(), 1);
    }
}
