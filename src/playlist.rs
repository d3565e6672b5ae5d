//! Playlist files.
//!
//! A playlist is plain text with one query per line. Lines whose first
//! non-whitespace character is `#` are comments; blank lines are ignored.
//!
//! ```text
//! # Sunday morning
//! @@Icarus EP
//! @Cascadia
//! %road trip
//! Artist/Album/01 Intro.flac
//! ```

use log::trace;

pub const COMMENT_MARKER: char = '#';

/// The queries contained in playlist `content`, in file order.
pub fn parse_queries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| {
            let keep = !line.is_empty() && !line.starts_with(COMMENT_MARKER);
            if !keep {
                trace!("Skipping playlist line {line:?}");
            }
            keep
        })
        .map(str::to_string)
        .collect()
}
