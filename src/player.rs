//! # Player Module
//!
//! Plays resolved tracks with `mpv`. The resolver output is passed through
//! untouched unless shuffling was asked for, in which case duplicates are
//! dropped and the order randomised before `mpv` sees it.

use anyhow::{bail, Context, Result};
use log::{debug, info};
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

/// Volume used when none is given.
pub const DEFAULT_VOLUME: u8 = 50;

/// How `mpv` should play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOptions {
    /// Show a window (with cover art if any)
    pub window: bool,
    /// Keep the window open after the last track; only meaningful with `window`
    pub keep_open: bool,
    /// Remove duplicates and shuffle
    pub shuffle: bool,
    /// mpv audio device id
    pub audio_device: Option<String>,
    pub volume: Option<u8>,
    /// Loop forever
    pub looping: bool,
    /// Extra arguments passed to mpv as-is
    pub extra_args: Vec<String>,
}

impl Default for PlayerOptions {
    fn default() -> Self {
        Self {
            window: false,
            keep_open: false,
            shuffle: false,
            audio_device: None,
            volume: Some(DEFAULT_VOLUME),
            looping: false,
            extra_args: Vec::new(),
        }
    }
}

/// Dedup (first occurrence wins) and shuffle when `shuffle` is set.
pub fn prepare_tracks(mut paths: Vec<PathBuf>, shuffle: bool) -> Vec<PathBuf> {
    if shuffle {
        let mut seen = HashSet::new();
        paths.retain(|path| seen.insert(path.clone()));
        paths.shuffle(&mut rand::thread_rng());
    }
    paths
}

/// The `mpv` invocation for `paths`.
pub fn build_command(paths: &[PathBuf], options: &PlayerOptions) -> Command {
    let mut cmd = Command::new("mpv");

    if options.window {
        cmd.arg("--force-window");
        if options.keep_open {
            cmd.arg("--keep-open=yes");
        }
    } else {
        cmd.arg("--no-audio-display");
    }

    if let Some(volume) = options.volume {
        cmd.arg(format!("--volume={volume}"));
    }
    if let Some(device) = &options.audio_device {
        cmd.arg(format!("--audio-device={device}"));
    }
    if options.looping {
        cmd.arg("--loop=inf");
    }

    cmd.args(&options.extra_args);
    cmd.arg("--").args(paths);
    cmd
}

/// Play `paths` and wait for mpv to exit.
pub fn play(paths: Vec<PathBuf>, options: &PlayerOptions) -> Result<()> {
    let paths = prepare_tracks(paths, options.shuffle);
    let mut cmd = build_command(&paths, options);

    info!("Playing {} tracks", paths.len());
    debug!("Running {cmd:?}");

    let status = cmd
        .status()
        .context("Failed to execute mpv. Please install mpv")?;

    if !status.success() {
        bail!("mpv exited with {status}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn args(cmd: &Command) -> Vec<&str> {
        cmd.get_args().map(|arg| arg.to_str().unwrap()).collect()
    }

    #[test]
    fn test_default_command() {
        let paths = vec![PathBuf::from("/m/a.flac"), PathBuf::from("/m/b.mp3")];
        let cmd = build_command(&paths, &PlayerOptions::default());

        assert_eq!(cmd.get_program(), OsStr::new("mpv"));
        assert_eq!(
            args(&cmd),
            vec!["--no-audio-display", "--volume=50", "--", "/m/a.flac", "/m/b.mp3"]
        );
    }

    #[test]
    fn test_window_and_keep_open() {
        let options = PlayerOptions { window: true, keep_open: true, volume: None, ..Default::default() };
        let cmd = build_command(&[], &options);
        assert_eq!(args(&cmd), vec!["--force-window", "--keep-open=yes", "--"]);

        let options = PlayerOptions { keep_open: true, volume: None, ..Default::default() };
        let cmd = build_command(&[], &options);
        assert_eq!(args(&cmd), vec!["--no-audio-display", "--"]);
    }

    #[test]
    fn test_device_loop_and_passthrough() {
        let options = PlayerOptions {
            audio_device: Some("pulse/sink".to_string()),
            volume: Some(30),
            looping: true,
            extra_args: vec!["--speed=1.5".to_string()],
            ..Default::default()
        };
        let cmd = build_command(&[PathBuf::from("x.ogg")], &options);
        assert_eq!(
            args(&cmd),
            vec![
                "--no-audio-display",
                "--volume=30",
                "--audio-device=pulse/sink",
                "--loop=inf",
                "--speed=1.5",
                "--",
                "x.ogg"
            ]
        );
    }

    #[test]
    fn test_paths_after_separator_even_if_dashed() {
        let cmd = build_command(&[PathBuf::from("--not-a-flag.mp3")], &PlayerOptions::default());
        let args = args(&cmd);
        let separator = args.iter().position(|a| *a == "--").unwrap();
        assert_eq!(args[separator + 1], "--not-a-flag.mp3");
    }

    #[test]
    fn test_prepare_tracks_without_shuffle_is_identity() {
        let paths = vec![PathBuf::from("b"), PathBuf::from("a"), PathBuf::from("b")];
        assert_eq!(prepare_tracks(paths.clone(), false), paths);
    }

    #[test]
    fn test_prepare_tracks_shuffle_removes_duplicates() {
        let paths = vec![PathBuf::from("b"), PathBuf::from("a"), PathBuf::from("b")];
        let mut prepared = prepare_tracks(paths, true);
        prepared.sort();
        assert_eq!(prepared, vec![PathBuf::from("a"), PathBuf::from("b")]);
    }
}
