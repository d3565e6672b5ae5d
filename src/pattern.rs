//! # Pattern Compiler Module
//!
//! Builds the regular expressions handed to the search backend. Patterns are
//! composed from named fragments, where a fragment template may pull in any
//! fragment defined before it:
//!
//! ```
//! use musplay::pattern::Patterner;
//!
//! let mut p = Patterner::new();
//! p.define("SIGN", r"\+|-")?;
//! p.define("DIGITS", "[0-9]{1,3}")?;
//! p.define("NUMBER", "{SIGN}?{DIGITS}")?;
//!
//! assert_eq!(p.fragment("NUMBER")?.source(), r"(?:(?:\+|-)?(?:[0-9]{1,3}))");
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Template Syntax
//!
//! - `{NAME}` is replaced by the compiled value of fragment `NAME`
//! - `{}` is a slot, filled later with a search term via [`Fragment::fill`]
//! - `{3}`, `{2,}`, `{2,5}` are regex repetitions and pass through untouched
//! - `\{` and `\}` are literal braces
//!
//! Every template is wrapped in a non-capturing group before expansion, so a
//! fragment always behaves as a single regex atom wherever it is spliced.

use anyhow::Result;
use log::debug;
use std::collections::HashMap;
use std::fmt;

/// Audio file extensions a track query may resolve to. Kept sorted so the
/// compiled alternation is stable between runs.
pub const MEDIA_EXTENSIONS: &[&str] = &["flac", "m4a", "mp3", "oga", "ogg", "wav"];

/// Extension of playlist files.
pub const PLAYLIST_EXTENSION: &str = "txt";

/// Errors raised while defining fragments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    /// A template referenced a fragment that is not defined (yet).
    #[error("fragment '{fragment}' references '{reference}', which is not defined")]
    UndefinedFragment { fragment: String, reference: String },
    #[error("fragment '{fragment}' is already defined")]
    DuplicateFragment { fragment: String },
    /// A brace that neither opens a placeholder nor is escaped.
    #[error("unbalanced brace at offset {position} in fragment '{fragment}'")]
    UnbalancedBrace { fragment: String, position: usize },
    /// `{...}` containing something other than a name, a repetition or nothing.
    #[error("invalid placeholder '{{{placeholder}}}' in fragment '{fragment}'")]
    InvalidPlaceholder { fragment: String, placeholder: String },
    #[error("no fragment named '{fragment}'")]
    UnknownFragment { fragment: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Slot,
}

/// A compiled fragment: regex source with zero or more term slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    name: String,
    pieces: Vec<Piece>,
}

impl Fragment {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether [`fill`](Self::fill) has anything to substitute.
    pub fn has_slot(&self) -> bool {
        self.pieces.iter().any(|piece| *piece == Piece::Slot)
    }

    /// The compiled regex source, with slots rendered as `{}`.
    pub fn source(&self) -> String {
        self.render("{}")
    }

    /// Substitute `value` into every slot. The value is inserted verbatim;
    /// escaping is the caller's business.
    pub fn fill(&self, value: &str) -> String {
        self.render(value)
    }

    fn render(&self, slot: &str) -> String {
        self.pieces
            .iter()
            .map(|piece| match piece {
                Piece::Literal(text) => text.as_str(),
                Piece::Slot => slot,
            })
            .collect()
    }
}

/// Ordered table of named fragments.
///
/// A fragment can only reference fragments that already exist, so the table
/// is a DAG by construction and expansion happens once, at definition time.
#[derive(Debug, Clone, Default)]
pub struct Patterner {
    fragments: HashMap<String, Fragment>,
}

impl Patterner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` with the given template.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] if the name is taken, the template references
    /// an undefined fragment, or its braces do not parse.
    pub fn define(&mut self, name: &str, template: &str) -> Result<&Fragment> {
        if self.fragments.contains_key(name) {
            return Err(PatternError::DuplicateFragment { fragment: name.to_string() }.into());
        }

        let pieces = self.expand(name, &format!("(?:{template})"))?;
        let fragment = Fragment { name: name.to_string(), pieces };
        debug!("Defined fragment {name} = {}", fragment.source());

        Ok(&*self.fragments.entry(name.to_string()).or_insert(fragment))
    }

    pub fn get(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    /// Like [`get`](Self::get), but a missing fragment is an error.
    pub fn fragment(&self, name: &str) -> Result<&Fragment> {
        self.fragments
            .get(name)
            .ok_or_else(|| PatternError::UnknownFragment { fragment: name.to_string() }.into())
    }

    fn expand(&self, name: &str, template: &str) -> Result<Vec<Piece>, PatternError> {
        let mut pieces = Vec::new();
        let mut chars = template.char_indices();

        while let Some((position, c)) = chars.next() {
            match c {
                '\\' => {
                    let mut escaped = String::from('\\');
                    if let Some((_, next)) = chars.next() {
                        escaped.push(next);
                    }
                    push_literal(&mut pieces, &escaped);
                }
                '{' => {
                    let rest = &template[position + 1..];
                    let end = rest
                        .find('}')
                        .ok_or_else(|| PatternError::UnbalancedBrace { fragment: name.to_string(), position })?;
                    let inner = &rest[..end];

                    if inner.is_empty() {
                        pieces.push(Piece::Slot);
                    } else if is_repetition(inner) {
                        push_literal(&mut pieces, &format!("{{{inner}}}"));
                    } else if is_identifier(inner) {
                        let referenced = self.fragments.get(inner).ok_or_else(|| {
                            PatternError::UndefinedFragment {
                                fragment: name.to_string(),
                                reference: inner.to_string(),
                            }
                        })?;
                        for piece in &referenced.pieces {
                            match piece {
                                Piece::Literal(text) => push_literal(&mut pieces, text),
                                Piece::Slot => pieces.push(Piece::Slot),
                            }
                        }
                    } else {
                        return Err(PatternError::InvalidPlaceholder {
                            fragment: name.to_string(),
                            placeholder: inner.to_string(),
                        });
                    }

                    // Skip over the placeholder body and its closing brace.
                    for _ in 0..=inner.chars().count() {
                        chars.next();
                    }
                }
                '}' => {
                    return Err(PatternError::UnbalancedBrace { fragment: name.to_string(), position });
                }
                _ => {
                    let mut buf = [0u8; 4];
                    push_literal(&mut pieces, c.encode_utf8(&mut buf));
                }
            }
        }

        Ok(pieces)
    }
}

fn push_literal(pieces: &mut Vec<Piece>, text: &str) {
    if let Some(Piece::Literal(last)) = pieces.last_mut() {
        last.push_str(text);
    } else {
        pieces.push(Piece::Literal(text.to_string()));
    }
}

/// `3`, `3,` or `3,5`.
fn is_repetition(inner: &str) -> bool {
    let (min, max) = match inner.split_once(',') {
        Some((min, max)) => (min, Some(max)),
        None => (inner, None),
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    digits(min) && max.map_or(true, |max| max.is_empty() || digits(max))
}

fn is_identifier(inner: &str) -> bool {
    let mut chars = inner.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Split `term` on `delimiter`, put each trimmed piece into `element`'s slot
/// and join the results back with the same delimiter.
///
/// ```
/// use musplay::pattern::{term_to_fragment, Patterner};
///
/// let mut p = Patterner::new();
/// let word = p.define("WORD", "x{}x")?.clone();
/// assert_eq!(term_to_fragment("a b", " ", &word), "(?:xax) (?:xbx)");
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn term_to_fragment(term: &str, delimiter: &str, element: &Fragment) -> String {
    term.split(delimiter)
        .map(|part| element.fill(part.trim()))
        .collect::<Vec<_>>()
        .join(delimiter)
}

/// The four things a prefixed query can search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Track title: tokens must all appear in the file name.
    Title,
    /// Album: tokens are matched against directory names.
    Album,
    /// Playlist file name in the playlist directory.
    Playlist,
    /// Anything along the whole path.
    General,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Title => "title",
            Self::Album => "album",
            Self::Playlist => "playlist",
            Self::General => "general",
        };
        f.write_str(name)
    }
}

/// Turns a search term into a backend pattern for a given [`QueryKind`].
///
/// Construction defines the fragment table once; compiling is then a pure
/// function of the kind and the term.
#[derive(Debug, Clone)]
pub struct PatternCompiler {
    patterner: Patterner,
    escape_terms: bool,
}

impl PatternCompiler {
    /// Compiler for the default media extensions.
    ///
    /// With `escape_terms` set, regex metacharacters in search terms match
    /// literally; otherwise terms are spliced in as regex source.
    pub fn new(escape_terms: bool) -> Result<Self> {
        Self::with_extensions(MEDIA_EXTENSIONS, escape_terms)
    }

    pub fn with_extensions(extensions: &[&str], escape_terms: bool) -> Result<Self> {
        let extensions = extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");

        let mut p = Patterner::new();
        p.define("EXTENSION", &extensions)?;
        p.define("ENDING", "[.]{EXTENSION}$")?;
        p.define("PLAYLIST_ENDING", &format!("[.]{PLAYLIST_EXTENSION}$"))?;
        p.define("ANY", ".*?{}.*?")?;
        p.define("IN_SEGMENT", "[^/]*?{}[^/]*?")?;
        p.define("TITLE", ".*?/{}{ENDING}")?;
        p.define("ALBUM", ".*?{}/.*?{ENDING}")?;
        p.define("GENERAL", "{}{ENDING}")?;
        p.define("PLAYLIST", ".*?{}.*?{PLAYLIST_ENDING}")?;

        Ok(Self { patterner: p, escape_terms })
    }

    pub fn escapes_terms(&self) -> bool {
        self.escape_terms
    }

    /// Compile `term` into a pattern for `kind`.
    ///
    /// A playlist term may name the file with its extension (`Fake.txt`);
    /// the extension is dropped since the pattern already ends with it.
    pub fn compile(&self, kind: QueryKind, term: &str) -> Result<String> {
        let term = match kind {
            QueryKind::Playlist => self.prepare(strip_playlist_extension(term.trim())),
            _ => self.prepare(term),
        };
        let in_segment = self.patterner.fragment("IN_SEGMENT")?;

        let pattern = match kind {
            QueryKind::Title => self
                .patterner
                .fragment("TITLE")?
                .fill(&term_to_fragment(&term, " ", in_segment)),
            QueryKind::Album => self
                .patterner
                .fragment("ALBUM")?
                .fill(&segment_words(&term, in_segment)),
            QueryKind::General => {
                let any = self.patterner.fragment("ANY")?;
                self.patterner
                    .fragment("GENERAL")?
                    .fill(&segment_words(&term, any))
            }
            QueryKind::Playlist => self
                .patterner
                .fragment("PLAYLIST")?
                .fill(&term_to_fragment(&term, " ", in_segment)),
        };

        debug!("Compiled {kind} pattern for {term:?}: {pattern}");
        Ok(pattern)
    }

    fn prepare(&self, term: &str) -> String {
        let term = term.trim();
        if self.escape_terms {
            regex::escape(term)
        } else {
            term.to_string()
        }
    }
}

fn strip_playlist_extension(term: &str) -> &str {
    let suffix_len = PLAYLIST_EXTENSION.len() + 1;
    match term.len().checked_sub(suffix_len) {
        Some(cut)
            if term.is_char_boundary(cut)
                && term[cut..].starts_with('.')
                && term[cut + 1..].eq_ignore_ascii_case(PLAYLIST_EXTENSION) =>
        {
            &term[..cut]
        }
        _ => term,
    }
}

/// Each `/` segment keeps its place in the path; the words inside a segment
/// are matched one by one with `word`.
fn segment_words(term: &str, word: &Fragment) -> String {
    term.split('/')
        .map(|segment| term_to_fragment(segment.trim(), " ", word))
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::RegexBuilder;

    fn matches(pattern: &str, path: &str) -> bool {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("compiled pattern should be valid regex")
            .is_match(path)
    }

    #[test]
    fn test_define_wraps_template_in_group() -> Result<()> {
        let mut p = Patterner::new();
        let fragment = p.define("SIGN", r"\+|-")?;
        assert_eq!(fragment.source(), r"(?:\+|-)");
        assert_eq!(fragment.name(), "SIGN");
        assert!(!fragment.has_slot());
        Ok(())
    }

    #[test]
    fn test_define_substitutes_earlier_fragments() -> Result<()> {
        let mut p = Patterner::new();
        p.define("REGNUM", "[0-9]+(?:_[0-9]+)*")?;
        p.define("SIGN", r"\+|\-")?;
        p.define("EXPONENT", "e{SIGN}?{REGNUM}")?;

        assert_eq!(
            p.fragment("EXPONENT")?.source(),
            r"(?:e(?:\+|\-)?(?:[0-9]+(?:_[0-9]+)*))"
        );
        Ok(())
    }

    #[test]
    fn test_forward_reference_fails_at_definition() {
        let mut p = Patterner::new();
        let err = p.define("NUMBER", "{SIGN}[0-9]+").unwrap_err();

        assert_eq!(
            err.downcast_ref::<PatternError>(),
            Some(&PatternError::UndefinedFragment {
                fragment: "NUMBER".to_string(),
                reference: "SIGN".to_string(),
            })
        );
        assert!(p.get("NUMBER").is_none());
    }

    #[test]
    fn test_duplicate_definition_rejected() -> Result<()> {
        let mut p = Patterner::new();
        p.define("A", "a")?;
        let err = p.define("A", "b").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PatternError>(),
            Some(PatternError::DuplicateFragment { .. })
        ));
        assert_eq!(p.fragment("A")?.source(), "(?:a)");
        Ok(())
    }

    #[test]
    fn test_repetition_braces_survive_later_definitions() -> Result<()> {
        let mut p = Patterner::new();
        p.define("HEX", "[0-9a-f]{4}")?;
        p.define("RANGE", "x{2,}y{1,3}")?;
        p.define("PAIR", "{HEX}-{HEX}")?;

        assert_eq!(p.fragment("PAIR")?.source(), "(?:(?:[0-9a-f]{4})-(?:[0-9a-f]{4}))");
        assert_eq!(p.fragment("RANGE")?.source(), "(?:x{2,}y{1,3})");
        Ok(())
    }

    #[test]
    fn test_escaped_braces_are_literal() -> Result<()> {
        let mut p = Patterner::new();
        p.define("BRACED", r"\{NAME\}")?;
        assert_eq!(p.fragment("BRACED")?.source(), r"(?:\{NAME\})");
        Ok(())
    }

    #[test]
    fn test_playlist_term_may_include_extension() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let with_ext = compiler.compile(QueryKind::Playlist, "Fake.txt")?;

        assert_eq!(with_ext, compiler.compile(QueryKind::Playlist, "Fake")?);
        assert!(matches(&with_ext, "/music/Playlists/Fake.txt"));
        assert!(matches(&compiler.compile(QueryKind::Playlist, "fake.TXT")?, "/music/Playlists/Fake.txt"));
        assert!(!matches(&with_ext, "/music/Playlists/Other.txt"));
        Ok(())
    }

    #[test]
    fn test_strip_playlist_extension() {
        assert_eq!(strip_playlist_extension("Fake.txt"), "Fake");
        assert_eq!(strip_playlist_extension("road trip.TXT"), "road trip");
        assert_eq!(strip_playlist_extension("context"), "context");
        assert_eq!(strip_playlist_extension(".txt"), "");
        assert_eq!(strip_playlist_extension("ém"), "ém");
    }

    #[test]
    fn test_pattern_error_messages() {
        let err = PatternError::InvalidPlaceholder { fragment: "F".to_string(), placeholder: "a b".to_string() };
        assert_eq!(err.to_string(), "invalid placeholder '{a b}' in fragment 'F'");

        let err = PatternError::UndefinedFragment { fragment: "N".to_string(), reference: "SIGN".to_string() };
        assert_eq!(err.to_string(), "fragment 'N' references 'SIGN', which is not defined");
    }

    #[test]
    fn test_brace_errors() {
        let mut p = Patterner::new();
        assert!(matches!(
            p.define("OPEN", "a{b").unwrap_err().downcast_ref::<PatternError>(),
            Some(PatternError::UnbalancedBrace { .. })
        ));
        assert!(matches!(
            p.define("CLOSE", "a}b").unwrap_err().downcast_ref::<PatternError>(),
            Some(PatternError::UnbalancedBrace { .. })
        ));
        assert!(matches!(
            p.define("WEIRD", "a{b c}").unwrap_err().downcast_ref::<PatternError>(),
            Some(PatternError::InvalidPlaceholder { .. })
        ));
    }

    #[test]
    fn test_slots_propagate_through_references() -> Result<()> {
        let mut p = Patterner::new();
        p.define("ANY", ".*?{}.*?")?;
        let outer = p.define("OUTER", "^{ANY}$")?;

        assert!(outer.has_slot());
        assert_eq!(outer.fill("abc"), "(?:^(?:.*?abc.*?)$)");
        Ok(())
    }

    #[test]
    fn test_fill_does_not_rescan_inserted_value() -> Result<()> {
        let mut p = Patterner::new();
        let fragment = p.define("WRAP", "<{}>")?;
        assert_eq!(fragment.fill("{}{ENDING}"), "(?:<{}{ENDING}>)");
        Ok(())
    }

    #[test]
    fn test_term_to_fragment_keeps_delimiters() -> Result<()> {
        let mut p = Patterner::new();
        let word = p.define("WORD", "<{}>")?.clone();

        assert_eq!(term_to_fragment("a b c", " ", &word), "(?:<a>) (?:<b>) (?:<c>)");
        assert_eq!(term_to_fragment("x / y", "/", &word), "(?:<x>)/(?:<y>)");
        assert_eq!(term_to_fragment("", " ", &word), "(?:<>)");
        Ok(())
    }

    #[test]
    fn test_title_pattern_matches_file_name_only() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::Title, "Cascadia")?;

        assert!(matches(&pattern, "Artist/Album/Cascadia.flac"));
        assert!(matches(&pattern, "/music/Artist/Album/01 - cascadia (live).mp3"));
        assert!(!matches(&pattern, "Cascadia/Album/Other.flac"));
        assert!(!matches(&pattern, "Artist/Album/Cascadia.flac.part"));
        Ok(())
    }

    #[test]
    fn test_title_pattern_is_anchored_to_media_extension() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        for term in ["", "a", "Cascadia", "two words", "with/slash", "(weird) [chars]"] {
            let pattern = compiler.compile(QueryKind::Title, term)?;
            assert!(
                pattern.ends_with("(?:[.](?:flac|m4a|mp3|oga|ogg|wav)$))"),
                "pattern for {term:?} is not anchored: {pattern}"
            );
            assert!(!matches(&pattern, "dir/file.txt"));
        }
        Ok(())
    }

    #[test]
    fn test_title_tokens_match_in_order() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::Title, "hello world")?;

        assert!(matches(&pattern, "x/Hello Big World.ogg"));
        assert!(!matches(&pattern, "x/World Hello.ogg"));
        Ok(())
    }

    #[test]
    fn test_album_pattern_matches_directory() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::Album, "Icarus EP")?;

        assert!(matches(&pattern, "/music/Ghosts/Icarus EP/01 Intro.flac"));
        assert!(matches(&pattern, "/music/Ghosts/Icarus EP/Disc 1/01 Intro.flac"));
        assert!(!matches(&pattern, "/music/Ghosts/Other/Icarus EP.flac"));
        Ok(())
    }

    #[test]
    fn test_album_pattern_with_segments() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::Album, "ghosts/icarus")?;

        assert!(matches(&pattern, "/music/Ghosts/Icarus EP/01.mp3"));
        assert!(!matches(&pattern, "/music/Ghosts/Other/Icarus.mp3"));
        Ok(())
    }

    #[test]
    fn test_general_pattern_matches_across_path() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::General, "trash80")?;

        assert!(matches(&pattern, "/music/Trash80/Icarus/Song.wav"));
        assert!(matches(&pattern, "/music/Various/trash80 - remix.m4a"));
        assert!(!matches(&pattern, "/music/Trash80/cover.jpg"));
        Ok(())
    }

    #[test]
    fn test_playlist_pattern_requires_playlist_extension() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::Playlist, "road trip")?;

        assert!(matches(&pattern, "/music/Playlists/Road Trip.txt"));
        assert!(matches(&pattern, "/music/Playlists/summer/road-side trip 2.txt"));
        assert!(!matches(&pattern, "/music/Playlists/Road Trip.flac"));
        Ok(())
    }

    #[test]
    fn test_empty_term_matches_any_track() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        for kind in [QueryKind::Title, QueryKind::Album, QueryKind::General] {
            let pattern = compiler.compile(kind, "")?;
            assert!(matches(&pattern, "/music/a/b/c.flac"), "{kind} did not match");
        }
        Ok(())
    }

    #[test]
    fn test_escaped_terms_match_literally() -> Result<()> {
        let compiler = PatternCompiler::new(true)?;
        let pattern = compiler.compile(QueryKind::Title, "Mr.")?;

        assert!(matches(&pattern, "x/Mr. Blue Sky.mp3"));
        assert!(!matches(&pattern, "x/Mrs Blue Sky.mp3"));

        let parens = compiler.compile(QueryKind::Title, "(live")?;
        assert!(matches(&parens, "x/Song (Live at Home).mp3"));
        Ok(())
    }

    #[test]
    fn test_raw_terms_are_regex_source() -> Result<()> {
        let compiler = PatternCompiler::new(false)?;
        assert!(!compiler.escapes_terms());

        let pattern = compiler.compile(QueryKind::Title, "Mr.")?;
        assert!(pattern.contains("Mr."));
        assert!(matches(&pattern, "x/Mrs Blue Sky.mp3"));

        let alternation = compiler.compile(QueryKind::Title, "red|blue")?;
        assert!(matches(&alternation, "x/Blue.mp3"));
        Ok(())
    }

    #[test]
    fn test_compile_is_deterministic() -> Result<()> {
        let a = PatternCompiler::new(true)?;
        let b = PatternCompiler::new(true)?;
        for kind in [QueryKind::Title, QueryKind::Album, QueryKind::Playlist, QueryKind::General] {
            assert_eq!(a.compile(kind, "Icarus EP")?, b.compile(kind, "Icarus EP")?);
            assert_eq!(a.compile(kind, "Icarus EP")?, a.compile(kind, "Icarus EP")?);
        }
        Ok(())
    }

    #[test]
    fn test_custom_extensions() -> Result<()> {
        let compiler = PatternCompiler::with_extensions(&["opus"], true)?;
        let pattern = compiler.compile(QueryKind::Title, "song")?;

        assert!(matches(&pattern, "a/song.opus"));
        assert!(!matches(&pattern, "a/song.mp3"));
        Ok(())
    }
}
