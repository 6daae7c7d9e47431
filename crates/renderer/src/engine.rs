//! Invoking the rendering engine as a subprocess.
//!
//! The engine is a CLI program: it takes a scene source file plus flags for
//! output naming and media directory, renders out-of-process, and deposits
//! its video at `<media-root>/videos/<scene-stem>/<quality>/<name>.mp4`.
//! Exit code communicates success; diagnostics go to stderr.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::artifacts::ArtifactStore;
use crate::error::RenderError;

/// How to reach and drive the rendering engine.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Engine binary name or path; resolved through $PATH when bare
    pub binary: PathBuf,
    /// Root of the engine's own media cache
    pub media_root: PathBuf,
    /// Directory scene files are written to before invocation
    pub scratch_dir: PathBuf,
    /// Quality tag the engine nests its output under
    pub quality: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("manim"),
            media_root: PathBuf::from("media"),
            scratch_dir: PathBuf::from("scratch"),
            quality: "1080p60".to_string(),
        }
    }
}

impl RenderConfig {
    /// Override the engine binary (default: "manim")
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Override the engine media root (default: "media")
    pub fn with_media_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.media_root = root.into();
        self
    }

    /// Override the scratch directory (default: "scratch")
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Override the quality tag (default: "1080p60")
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = quality.into();
        self
    }
}

/// Drives one render through the external engine.
pub struct RenderEngine {
    config: RenderConfig,
}

impl RenderEngine {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Resolve the configured binary through $PATH, if it is there.
    /// Useful as a preflight check before accepting work.
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.config.binary).ok()
    }

    /// Render `source` and park the resulting video in the store under
    /// `artifact_id`. Returns the serving path of the new artifact.
    ///
    /// Steps:
    /// 1. Write the scene file to the scratch directory
    /// 2. Run the engine, blocking until it exits
    /// 3. Pick the video up from the engine's conventional output path
    /// 4. Move it into the serving directory
    /// 5. Clean up the scene file and the engine's per-scene cache
    pub async fn render(
        &self,
        source: &str,
        artifact_id: u64,
        store: &ArtifactStore,
    ) -> Result<PathBuf, RenderError> {
        let scene_stem = format!("scene_{artifact_id}");
        let output_name = artifact_id.to_string();

        fs::create_dir_all(&self.config.scratch_dir)?;
        let scene_path = self.config.scratch_dir.join(format!("{scene_stem}.py"));
        fs::write(&scene_path, source)?;
        debug!(
            "Wrote scene file {} ({} bytes)",
            scene_path.display(),
            source.len()
        );

        let output = Command::new(&self.config.binary)
            .arg("-o")
            .arg(&output_name)
            .arg("--media_dir")
            .arg(&self.config.media_root)
            .arg(&scene_path)
            .output()
            .await
            .map_err(|source| RenderError::Launch {
                binary: self.config.binary.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            warn!(
                code = ?output.status.code(),
                "Render engine failed: {}",
                stderr.trim()
            );
            return Err(RenderError::EngineFailed {
                code: output.status.code(),
                stderr,
            });
        }

        // The engine deposits its video under a fixed nested convention.
        let produced = self
            .config
            .media_root
            .join("videos")
            .join(&scene_stem)
            .join(&self.config.quality)
            .join(format!("{output_name}.mp4"));
        if !produced.exists() {
            return Err(RenderError::MissingOutput(produced));
        }

        let dest = store.path_for(artifact_id);
        relocate(&produced, &dest)?;
        info!("Rendered artifact {}", dest.display());

        self.cleanup_render(&scene_path, &scene_stem);
        Ok(dest)
    }

    /// Remove everything a finished render left behind: the scene file and
    /// the engine's per-scene cache directory. Best-effort.
    fn cleanup_render(&self, scene_path: &Path, scene_stem: &str) {
        if let Err(e) = fs::remove_file(scene_path) {
            warn!("Could not remove scene file {}: {}", scene_path.display(), e);
        }
        let cache_dir = self.config.media_root.join("videos").join(scene_stem);
        if cache_dir.is_dir() {
            if let Err(e) = fs::remove_dir_all(&cache_dir) {
                warn!(
                    "Could not remove engine cache {}: {}",
                    cache_dir.display(),
                    e
                );
            }
        }
    }

    /// Empty the scratch directory. Files and subdirectories both go;
    /// a missing directory is not an error.
    pub fn clean_scratch(&self) -> std::io::Result<()> {
        let dir = &self.config.scratch_dir;
        if !dir.is_dir() {
            debug!("Scratch directory {} does not exist", dir.display());
            return Ok(());
        }
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                fs::remove_dir_all(&path)?;
            } else {
                fs::remove_file(&path)?;
            }
        }
        info!("Emptied scratch directory {}", dir.display());
        Ok(())
    }
}

/// Move a file, falling back to copy-and-remove when rename fails
/// (serving directory on a different filesystem than the media root).
fn relocate(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => {
            fs::copy(from, to)?;
            fs::remove_file(from)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::{tempdir, TempDir};

    /// Write a fake engine executable into `dir` and return its path.
    fn fake_engine(dir: &TempDir, script: &str) -> PathBuf {
        let path = dir.path().join("engine.sh");
        fs::write(&path, script).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// A fake engine honoring the real invocation shape:
    /// `engine -o NAME --media_dir ROOT SCENE`
    const HAPPY_ENGINE: &str = r#"#!/bin/sh
name="$2"
root="$4"
scene="$5"
stem=$(basename "$scene" .py)
mkdir -p "$root/videos/$stem/1080p60"
printf 'video-bytes' > "$root/videos/$stem/1080p60/$name.mp4"
"#;

    const FAILING_ENGINE: &str = r#"#!/bin/sh
echo "scene code raised an error" >&2
exit 3
"#;

    /// Exits 0 without producing anything.
    const AMNESIC_ENGINE: &str = r#"#!/bin/sh
exit 0
"#;

    fn test_setup(script: &str) -> (TempDir, RenderEngine, ArtifactStore) {
        let dir = tempdir().unwrap();
        let binary = fake_engine(&dir, script);
        let config = RenderConfig::default()
            .with_binary(binary)
            .with_media_root(dir.path().join("media"))
            .with_scratch_dir(dir.path().join("scratch"));
        let engine = RenderEngine::new(config);
        let store = ArtifactStore::open(dir.path().join("videos")).unwrap();
        (dir, engine, store)
    }

    #[tokio::test]
    async fn test_successful_render_moves_artifact_into_store() {
        let (_dir, engine, store) = test_setup(HAPPY_ENGINE);

        let id = store.next_id();
        let path = engine.render("print('scene')", id, &store).await.unwrap();

        assert_eq!(path, store.path_for(id));
        assert!(path.exists(), "artifact should exist at the returned path");
        assert_eq!(store.artifact_count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_successful_render_cleans_up_intermediates() {
        let (dir, engine, store) = test_setup(HAPPY_ENGINE);

        let id = store.next_id();
        engine.render("print('scene')", id, &store).await.unwrap();

        let scene_path = dir.path().join("scratch").join(format!("scene_{id}.py"));
        assert!(!scene_path.exists(), "scene file should be removed");
        let cache = dir
            .path()
            .join("media")
            .join("videos")
            .join(format!("scene_{id}"));
        assert!(!cache.exists(), "engine cache should be removed");
    }

    #[tokio::test]
    async fn test_engine_failure_is_reported_with_diagnostics() {
        let (_dir, engine, store) = test_setup(FAILING_ENGINE);

        let id = store.next_id();
        let err = engine.render("broken", id, &store).await.unwrap_err();

        match err {
            RenderError::EngineFailed { code, stderr } => {
                assert_eq!(code, Some(3));
                assert!(stderr.contains("scene code raised an error"));
            }
            other => panic!("expected EngineFailed, got {other:?}"),
        }
        assert_eq!(store.artifact_count().unwrap(), 0, "no artifact on failure");
    }

    #[tokio::test]
    async fn test_missing_output_after_clean_exit() {
        let (_dir, engine, store) = test_setup(AMNESIC_ENGINE);

        let id = store.next_id();
        let err = engine.render("whatever", id, &store).await.unwrap_err();

        assert!(matches!(err, RenderError::MissingOutput(_)));
        assert_eq!(store.artifact_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unlaunchable_engine_is_a_launch_error() {
        let dir = tempdir().unwrap();
        let config = RenderConfig::default()
            .with_binary(dir.path().join("does-not-exist"))
            .with_media_root(dir.path().join("media"))
            .with_scratch_dir(dir.path().join("scratch"));
        let engine = RenderEngine::new(config);
        let store = ArtifactStore::open(dir.path().join("videos")).unwrap();

        let err = engine.render("x", store.next_id(), &store).await.unwrap_err();
        assert!(matches!(err, RenderError::Launch { .. }));
    }

    #[tokio::test]
    async fn test_clean_scratch_empties_directory() {
        let (dir, engine, _store) = test_setup(HAPPY_ENGINE);
        let scratch = dir.path().join("scratch");
        fs::create_dir_all(scratch.join("nested")).unwrap();
        fs::write(scratch.join("scene_1.py"), "x").unwrap();
        fs::write(scratch.join("nested").join("junk"), "x").unwrap();

        engine.clean_scratch().unwrap();

        assert!(scratch.is_dir(), "scratch itself stays");
        assert_eq!(fs::read_dir(&scratch).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_clean_scratch_on_missing_directory_is_ok() {
        let (_dir, engine, _store) = test_setup(HAPPY_ENGINE);
        // never rendered, so the scratch dir was never created
        assert!(engine.clean_scratch().is_ok());
    }
}
