//! # Query Resolver Module
//!
//! Turns a list of queries into a list of track paths. Prefixed queries are
//! compiled into patterns and handed to the search backend; playlists are
//! read and their lines resolved recursively.
//!
//! ## Playlist Recursion
//!
//! Each top-level [`Resolver::resolve`] call owns a fresh
//! [`ResolutionCache`] keyed by canonical playlist path:
//!
//! ```text
//! Unvisited ──begin──▶ InProgress ──finish──▶ Resolved(paths)
//! ```
//!
//! - Meeting an `InProgress` playlist means it includes itself somewhere up
//!   the call stack. The reference is dropped with a warning.
//! - Meeting a `Resolved` playlist reuses its paths without reading the file.
//!
//! ## Failures
//!
//! An unreadable playlist or a literal path with an unknown extension aborts
//! the whole run with a [`ResolveError`]. Everything else (no match, empty
//! playlist, recursive playlist) is a [`Warning`]: it is logged, recorded on
//! the [`Resolution`], and the query contributes no paths.

use crate::config::{expand_tilde, Config};
use crate::pattern::{PatternCompiler, QueryKind};
use crate::playlist;
use crate::query::{self, Query};
use crate::search::SearchDelegate;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use path_absolutize::Absolutize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Conditions that abort a resolution run.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// A literal path query whose extension is neither media nor playlist.
    #[error("unknown extension {} for query '{query}'", describe_extension(.extension))]
    UnknownExtension { query: String, extension: String },
    /// A playlist that could not be located or read.
    #[error("cannot read playlist '{}'", path.display())]
    UnreadablePlaylist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn describe_extension(extension: &str) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        format!("'.{extension}'")
    }
}

/// Non-fatal anomalies met while resolving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The search backend found nothing for this query.
    NoMatch { query: String },
    /// A playlist referenced while it was still being resolved.
    RecursivePlaylist { playlist: PathBuf },
    /// A playlist with no query lines.
    EmptyPlaylist { playlist: PathBuf },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMatch { query } => write!(f, "no tracks found for pattern '{query}'"),
            Self::RecursivePlaylist { playlist } => write!(
                f,
                "recursive playlist: '{}' is already being loaded and won't be reincluded",
                playlist.display()
            ),
            Self::EmptyPlaylist { playlist } => {
                write!(f, "no patterns in playlist '{}'", playlist.display())
            }
        }
    }
}

/// Where a playlist stands within one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistState {
    Unvisited,
    InProgress,
    Resolved(Vec<PathBuf>),
}

static UNVISITED: PlaylistState = PlaylistState::Unvisited;

/// Per-run playlist memo, keyed by canonical path. States only move forward.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    entries: HashMap<PathBuf, PlaylistState>,
}

impl ResolutionCache {
    pub fn state(&self, playlist: &Path) -> &PlaylistState {
        self.entries.get(playlist).unwrap_or(&UNVISITED)
    }

    /// Mark an unvisited playlist as being resolved.
    pub fn begin(&mut self, playlist: &Path) {
        let previous = self.entries.insert(playlist.to_path_buf(), PlaylistState::InProgress);
        debug_assert!(previous.is_none(), "playlist {} visited twice", playlist.display());
    }

    /// Store the final paths of an in-progress playlist.
    pub fn finish(&mut self, playlist: &Path, paths: Vec<PathBuf>) {
        let previous = self
            .entries
            .insert(playlist.to_path_buf(), PlaylistState::Resolved(paths));
        debug_assert_eq!(previous, Some(PlaylistState::InProgress));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Counters for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    /// Playlist files read from disk
    pub playlists_loaded: usize,
    /// Playlist references answered from the cache
    pub cache_hits: usize,
    /// Calls into the search backend
    pub searches: usize,
}

/// Outcome of one top-level run.
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub paths: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
    pub stats: ResolveStats,
}

/// Resolves queries against one configuration.
///
/// The resolver itself holds no run state; every [`resolve`](Self::resolve)
/// starts from an empty cache.
pub struct Resolver {
    config: Config,
    compiler: PatternCompiler,
    search: Box<dyn SearchDelegate>,
}

impl Resolver {
    pub fn new(config: Config, search: Box<dyn SearchDelegate>) -> Result<Self> {
        let compiler = PatternCompiler::new(config.escape_terms)
            .context("Failed to build search patterns")?;
        Ok(Self { config, compiler, search })
    }

    /// Resolver using the backend named in `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let search = config.backend.delegate();
        Self::new(config, search)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve `queries` in order.
    ///
    /// # Errors
    ///
    /// Returns a [`ResolveError`] (inside `anyhow::Error`) for an unreadable
    /// playlist or an unknown literal extension, and propagates backend
    /// failures.
    pub fn resolve<I, S>(&self, queries: I) -> Result<Resolution>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut run = Run::new(self);
        let paths = run.resolve_all(queries)?;

        Ok(Resolution {
            paths,
            warnings: run.warnings,
            stats: run.stats,
        })
    }

    /// Resolve `queries`, then drop every path that `exclude` resolves to.
    ///
    /// The two lists are resolved independently, each with its own cache.
    pub fn resolve_excluding<S: AsRef<str>>(&self, queries: &[S], exclude: &[S]) -> Result<Resolution> {
        let mut resolution = self.resolve(queries)?;
        if exclude.is_empty() {
            return Ok(resolution);
        }

        let excluded = self.resolve(exclude)?;
        let excluded_paths: HashSet<&PathBuf> = excluded.paths.iter().collect();
        let before = resolution.paths.len();
        resolution.paths.retain(|path| !excluded_paths.contains(path));
        info!("Excluded {} of {before} tracks", before - resolution.paths.len());

        resolution.warnings.extend(excluded.warnings);
        Ok(resolution)
    }
}

/// State of a single top-level resolution.
struct Run<'r> {
    resolver: &'r Resolver,
    cache: ResolutionCache,
    warnings: Vec<Warning>,
    stats: ResolveStats,
}

impl<'r> Run<'r> {
    fn new(resolver: &'r Resolver) -> Self {
        Self {
            resolver,
            cache: ResolutionCache::default(),
            warnings: Vec::new(),
            stats: ResolveStats::default(),
        }
    }

    fn warn(&mut self, warning: Warning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    fn resolve_all<I, S>(&mut self, queries: I) -> Result<Vec<PathBuf>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut paths = Vec::new();
        for query in queries {
            paths.extend(self.resolve_query(query.as_ref())?);
        }
        Ok(paths)
    }

    fn resolve_query(&mut self, raw: &str) -> Result<Vec<PathBuf>> {
        match query::classify(raw) {
            Query::Blank => Ok(Vec::new()),
            Query::Search { prefix, kind, term } => {
                let pattern = self.resolver.compiler.compile(kind, term)?;
                debug!("Match: {prefix} => {term:?} ({pattern:?})");

                match kind {
                    QueryKind::Playlist => self.search_playlists(raw, term, &pattern),
                    _ => self.search_tracks(raw, &pattern),
                }
            }
            Query::Playlist(path) => self.resolve_playlist(&expand_tilde(Path::new(path))),
            Query::Track(path) => {
                let music_dir = &self.resolver.config.music_dir;
                let track = Path::new(path)
                    .absolutize_from(music_dir)
                    .with_context(|| format!("Failed to resolve track path {path}"))?;
                Ok(vec![track.into_owned()])
            }
            Query::Unrecognized { path, extension } => Err(ResolveError::UnknownExtension {
                query: path.to_string(),
                extension,
            }
            .into()),
        }
    }

    fn search_tracks(&mut self, raw: &str, pattern: &str) -> Result<Vec<PathBuf>> {
        self.stats.searches += 1;
        let found = self
            .resolver
            .search
            .find_files(pattern, &self.resolver.config.music_dir)?;

        if found.is_empty() {
            self.warn(Warning::NoMatch { query: raw.trim().to_string() });
        }
        Ok(found)
    }

    /// Playlists by file name, falling back to playlists mentioning `term`.
    fn search_playlists(&mut self, raw: &str, term: &str, pattern: &str) -> Result<Vec<PathBuf>> {
        let playlist_dir = &self.resolver.config.playlist_dir;

        self.stats.searches += 1;
        let mut found = self.resolver.search.find_files(pattern, playlist_dir)?;

        if found.is_empty() && !term.is_empty() {
            debug!("Searching by playlist content for {term:?}");
            self.stats.searches += 1;
            found = self
                .resolver
                .search
                .find_containing(term, playlist_dir)?
                .into_iter()
                .filter(|path| query::is_playlist_path(path))
                .collect();
        }

        if found.is_empty() {
            self.warn(Warning::NoMatch { query: raw.trim().to_string() });
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for playlist in found {
            debug!("- Found playlist {}", playlist.display());
            paths.extend(self.resolve_playlist(&playlist)?);
        }
        Ok(paths)
    }

    fn resolve_playlist(&mut self, path: &Path) -> Result<Vec<PathBuf>> {
        let playlist = fs::canonicalize(path).map_err(|source| ResolveError::UnreadablePlaylist {
            path: path.to_path_buf(),
            source,
        })?;

        match self.cache.state(&playlist) {
            PlaylistState::InProgress => {
                self.warn(Warning::RecursivePlaylist { playlist });
                return Ok(Vec::new());
            }
            PlaylistState::Resolved(paths) => {
                debug!("Reusing resolved playlist {}", playlist.display());
                let paths = paths.clone();
                self.stats.cache_hits += 1;
                return Ok(paths);
            }
            PlaylistState::Unvisited => {}
        }

        self.cache.begin(&playlist);

        let content = fs::read_to_string(&playlist).map_err(|source| ResolveError::UnreadablePlaylist {
            path: playlist.clone(),
            source,
        })?;
        self.stats.playlists_loaded += 1;
        info!("Loading playlist {}", playlist.display());

        let queries = playlist::parse_queries(&content);
        if queries.is_empty() {
            self.warn(Warning::EmptyPlaylist { playlist: playlist.clone() });
        }

        let paths = self
            .resolve_all(&queries)
            .with_context(|| format!("in playlist {}", playlist.display()))?;
        self.cache.finish(&playlist, paths.clone());

        Ok(paths)
    }
}
