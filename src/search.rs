//! # Search Backend Module
//!
//! The resolver never matches files itself. It hands a compiled pattern and a
//! root directory to a [`SearchDelegate`] and takes back the matching paths.
//!
//! ## Backends
//!
//! - [`AgSearcher`]: runs The Silver Searcher (`ag -i -g`), the default
//! - [`WalkSearcher`]: walks the directory in-process and matches with `regex`
//! - [`MemorySearcher`]: matches against a fixed list of paths
//!
//! Every backend matches case-insensitively. An empty result means "no
//! match"; errors are reserved for a backend that cannot run at all.

use crate::query::is_playlist_path;
use anyhow::{Context, Result};
use clap::ValueEnum;
use ignore::WalkBuilder;
use log::{debug, warn};
use rayon::prelude::*;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// `ag -G` file-name filter matching playlist files.
const PLAYLIST_FILES: &str = r"\.txt$";

/// Finds files for the resolver.
pub trait SearchDelegate {
    /// Paths under `root` whose path matches the regex `pattern`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot run or rejects the pattern.
    /// No match is an empty vector, not an error.
    fn find_files(&self, pattern: &str, root: &Path) -> Result<Vec<PathBuf>>;

    /// Playlist files under `root` whose content contains `text` literally.
    /// Other files are never opened.
    fn find_containing(&self, text: &str, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Which [`SearchDelegate`] the CLI builds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The Silver Searcher (`ag`)
    #[default]
    Ag,
    /// Built-in directory walk
    Walk,
}

impl Backend {
    pub fn delegate(self) -> Box<dyn SearchDelegate> {
        match self {
            Self::Ag => Box::new(AgSearcher::default()),
            Self::Walk => Box::new(WalkSearcher),
        }
    }
}

/// Searches with The Silver Searcher.
///
/// `ag` exits with status 0 when something matched and 1 when nothing did.
#[derive(Debug, Clone)]
pub struct AgSearcher {
    program: String,
}

impl Default for AgSearcher {
    fn default() -> Self {
        Self { program: "ag".to_string() }
    }
}

impl AgSearcher {
    /// Use a different `ag` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    fn command(&self, args: &[&str], root: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args).arg(root);
        cmd
    }

    fn files_command(&self, pattern: &str, root: &Path) -> Command {
        self.command(&["-i", "-g", pattern], root)
    }

    /// `-G` keeps `ag` away from anything but playlists; `--` stops a term
    /// like `--help` from being read as an option.
    fn content_command(&self, text: &str, root: &Path) -> Command {
        self.command(&["-l", "-i", "-Q", "-G", PLAYLIST_FILES, "--", text], root)
    }

    fn run(&self, mut cmd: Command) -> Result<Vec<PathBuf>> {
        debug!("Running {cmd:?}");

        let output = cmd
            .output()
            .with_context(|| format!(
                "Failed to execute {}. Please install the_silver_searcher or use --backend walk",
                self.program
            ))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                warn!("{} reported: {}", self.program, stderr.trim());
            }
            return Ok(Vec::new());
        }

        Ok(parse_paths(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl SearchDelegate for AgSearcher {
    fn find_files(&self, pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
        self.run(self.files_command(pattern, root))
    }

    fn find_containing(&self, text: &str, root: &Path) -> Result<Vec<PathBuf>> {
        self.run(self.content_command(text, root))
    }
}

/// One path per non-empty line.
fn parse_paths(stdout: &str) -> Vec<PathBuf> {
    stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn case_insensitive(pattern: &str) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .with_context(|| format!("Invalid search pattern: {pattern}"))
}

/// Walks `root` in file-name order, honouring ignore files and skipping
/// hidden entries the same way `ag` does.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkSearcher;

impl WalkSearcher {
    fn files_under(root: &Path) -> Vec<PathBuf> {
        WalkBuilder::new(root)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .map(|entry| entry.into_path())
            .collect()
    }
}

impl SearchDelegate for WalkSearcher {
    fn find_files(&self, pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
        let regex = case_insensitive(pattern)?;
        let files = Self::files_under(root);
        debug!("Matching {} files under {}", files.len(), root.display());

        Ok(files
            .into_par_iter()
            .filter(|path| regex.is_match(&path.to_string_lossy()))
            .collect())
    }

    fn find_containing(&self, text: &str, root: &Path) -> Result<Vec<PathBuf>> {
        let regex = case_insensitive(&regex::escape(text))?;

        Ok(Self::files_under(root)
            .into_par_iter()
            .filter(|path| is_playlist_path(path))
            .filter(|path| {
                fs::read_to_string(path)
                    .map(|content| regex.is_match(&content))
                    .unwrap_or(false)
            })
            .collect())
    }
}

/// Matches against a fixed list of paths plus optional file contents.
///
/// Only entries under the requested root are considered, mirroring a real
/// directory search.
#[derive(Debug, Clone, Default)]
pub struct MemorySearcher {
    files: Vec<(PathBuf, String)>,
}

impl MemorySearcher {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: paths.into_iter().map(|p| (p.into(), String::new())).collect(),
        }
    }

    /// Add a path with content, for [`SearchDelegate::find_containing`].
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.push((path.into(), content.into()));
        self
    }

    fn under<'a>(&'a self, root: &'a Path) -> impl Iterator<Item = &'a (PathBuf, String)> + 'a {
        self.files.iter().filter(move |(path, _)| path.starts_with(root))
    }
}

impl SearchDelegate for MemorySearcher {
    fn find_files(&self, pattern: &str, root: &Path) -> Result<Vec<PathBuf>> {
        let regex = case_insensitive(pattern)?;
        Ok(self
            .under(root)
            .filter(|(path, _)| regex.is_match(&path.to_string_lossy()))
            .map(|(path, _)| path.clone())
            .collect())
    }

    fn find_containing(&self, text: &str, root: &Path) -> Result<Vec<PathBuf>> {
        let needle = text.to_lowercase();
        Ok(self
            .under(root)
            .filter(|(path, content)| is_playlist_path(path) && content.to_lowercase().contains(&needle))
            .map(|(path, _)| path.clone())
            .collect())
    }
}
