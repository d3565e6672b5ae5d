//! Query classification.
//!
//! A query is one user token. Its prefix picks the kind of search:
//!
//! | Prefix | Searches for |
//! |--------|--------------|
//! | `@`    | track title (file name) |
//! | `@@`   | album (directory name) |
//! | `%`    | playlist in the playlist directory |
//! | `$`    | anything along the path |
//!
//! Without a prefix the token is a literal path to a track or a playlist.

use crate::pattern::{QueryKind, MEDIA_EXTENSIONS, PLAYLIST_EXTENSION};
use std::path::Path;

/// Prefix table. Lookup always prefers the longest matching prefix, so the
/// order here does not matter for correctness.
pub const PREFIXES: &[(&str, QueryKind)] = &[
    ("@@", QueryKind::Album),
    ("@", QueryKind::Title),
    ("%", QueryKind::Playlist),
    ("$", QueryKind::General),
];

/// A classified query, borrowing from the raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query<'a> {
    /// Empty or whitespace only.
    Blank,
    /// Prefixed search term.
    Search {
        prefix: &'static str,
        kind: QueryKind,
        term: &'a str,
    },
    /// Literal path to a playlist file.
    Playlist(&'a str),
    /// Literal path to a track.
    Track(&'a str),
    /// Literal path whose extension is neither media nor playlist.
    Unrecognized { path: &'a str, extension: String },
}

/// Longest prefix of `query` found in [`PREFIXES`].
pub fn match_prefix(query: &str) -> Option<(&'static str, QueryKind)> {
    PREFIXES
        .iter()
        .filter(|(prefix, _)| query.starts_with(prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .copied()
}

/// Classify one raw query string.
pub fn classify(raw: &str) -> Query<'_> {
    let query = raw.trim();
    if query.is_empty() {
        return Query::Blank;
    }

    if let Some((prefix, kind)) = match_prefix(query) {
        return Query::Search {
            prefix,
            kind,
            term: query[prefix.len()..].trim_start(),
        };
    }

    let extension = extension_of(query);
    if extension.eq_ignore_ascii_case(PLAYLIST_EXTENSION) {
        Query::Playlist(query)
    } else if is_media_extension(&extension) {
        Query::Track(query)
    } else {
        Query::Unrecognized { path: query, extension }
    }
}

pub fn is_media_extension(extension: &str) -> bool {
    MEDIA_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(extension))
}

pub fn is_playlist_path(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(PLAYLIST_EXTENSION))
}

fn extension_of(query: &str) -> String {
    Path::new(query)
        .extension()
        .map(|ext| ext.to_string_lossy().into_owned())
        .unwrap_or_default()
}
