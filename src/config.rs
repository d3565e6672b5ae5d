//! # Configuration Module
//!
//! Where the music library and the playlists live, and how queries are
//! searched.
//!
//! ## Sources
//!
//! 1. `--music-dir` / `--playlist-dir` on the command line
//! 2. `MUSPLAY_MUSIC` / `MUSPLAY_PLAYLISTS` in the environment
//!
//! The music directory is required. The playlist directory defaults to
//! `$MUSPLAY_MUSIC/Playlists` when that directory exists, and to the music
//! directory itself otherwise.

use crate::search::Backend;
use anyhow::{anyhow, ensure, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the music directory.
pub const MUSIC_ENV: &str = "MUSPLAY_MUSIC";

/// Environment variable naming the playlist directory.
pub const PLAYLISTS_ENV: &str = "MUSPLAY_PLAYLISTS";

/// Name of the playlist directory looked up inside the music directory.
pub const DEFAULT_PLAYLIST_SUBDIR: &str = "Playlists";

/// Configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root searched by track, album and general queries
    pub music_dir: PathBuf,
    /// Root searched by playlist queries
    pub playlist_dir: PathBuf,
    /// Match search terms literally instead of as regex source
    #[serde(default = "default_escape_terms")]
    pub escape_terms: bool,
    /// Search backend
    #[serde(default)]
    pub backend: Backend,
}

fn default_escape_terms() -> bool {
    true
}

impl Config {
    /// Build a configuration from optional sources.
    ///
    /// # Errors
    ///
    /// Fails if no music directory was given.
    pub fn from_sources(music_dir: Option<PathBuf>, playlist_dir: Option<PathBuf>) -> Result<Self> {
        let music_dir = music_dir.ok_or_else(|| anyhow!(
            "No music directory configured. Set {MUSIC_ENV} or pass --music-dir."
        ))?;

        let config = match playlist_dir {
            Some(playlist_dir) => Self::with_dirs(music_dir, playlist_dir),
            None => Self::with_music_dir(music_dir),
        };
        debug!("Using configuration: {config:?}");

        Ok(config)
    }

    /// Configuration with the default playlist directory.
    pub fn with_music_dir(music_dir: impl AsRef<Path>) -> Self {
        let music_dir = expand_tilde(music_dir.as_ref());
        let playlist_dir = default_playlist_dir(&music_dir);
        Self::with_dirs(music_dir, playlist_dir)
    }

    pub fn with_dirs(music_dir: impl AsRef<Path>, playlist_dir: impl AsRef<Path>) -> Self {
        Self {
            music_dir: expand_tilde(music_dir.as_ref()),
            playlist_dir: expand_tilde(playlist_dir.as_ref()),
            escape_terms: default_escape_terms(),
            backend: Backend::default(),
        }
    }

    /// Check that both roots are existing directories.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.music_dir.is_dir(),
            "Music directory `{}` does not exist or is not a directory!",
            self.music_dir.display()
        );
        ensure!(
            self.playlist_dir.is_dir(),
            "Playlist directory `{}` does not exist or is not a directory!",
            self.playlist_dir.display()
        );
        Ok(())
    }
}

/// `<music>/Playlists` if it is a directory, else `music` itself.
pub fn default_playlist_dir(music_dir: &Path) -> PathBuf {
    let candidate = music_dir.join(DEFAULT_PLAYLIST_SUBDIR);
    if candidate.is_dir() {
        candidate
    } else {
        music_dir.to_path_buf()
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}
