//! # Command-Line Interface Module
//!
//! Clap definitions for `musplay`.
//!
//! ## Commands
//!
//! - `find`: resolve queries and print the track paths
//! - `play`: resolve queries and play the tracks with mpv
//! - `completion`: print a shell completion script
//!
//! ## Examples
//!
//! ```bash
//! musplay find '@Cascadia' '@@Icarus EP'
//! musplay play -s '%road trip' --exclude '@@Christmas'
//! musplay play -n ~/lists/mix.txt
//! ```

use crate::config::{MUSIC_ENV, PLAYLISTS_ENV};
use crate::player::{PlayerOptions, DEFAULT_VOLUME};
use crate::search::Backend;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const QUERY_HELP: &str = "\
query prefixes:
  @          search by track title (file name minus extension)
  @@         search by album title (directory name)
  %          search for playlists in the playlist directory
  $          search by the entire path to the file
  no prefix  use the query as a literal path to a track or playlist (.txt)";

/// Shell types supported for completion generation
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

/// Main application arguments structure.
#[derive(Parser, Debug)]
#[command(name = "musplay")]
#[command(about = "Find and play music tracks from short-hand queries and playlists")]
#[command(version)]
pub struct Args {
    /// Where to find music tracks
    #[arg(long, global = true, env = MUSIC_ENV, value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub music_dir: Option<PathBuf>,

    /// Where to find playlists (default: <MUSIC_DIR>/Playlists, else MUSIC_DIR)
    #[arg(long, global = true, env = PLAYLISTS_ENV, value_name = "DIR", value_hint = clap::ValueHint::DirPath)]
    pub playlist_dir: Option<PathBuf>,

    /// Search backend
    #[arg(long, global = true, value_enum, default_value_t = Backend::Ag)]
    pub backend: Backend,

    /// Treat search terms as regular expressions instead of literal text
    #[arg(long, global = true)]
    pub raw_terms: bool,

    /// Print extra information for debugging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub debug: bool,

    /// Suppress non-fatal warnings
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Queries shared by `find` and `play`.
#[derive(ClapArgs, Debug, Clone)]
pub struct QueryArgs {
    /// The queries to search with (see prefixes below)
    #[arg(required = true, value_name = "QUERY")]
    pub queries: Vec<String>,

    /// Exclude anything matched by the given queries
    #[arg(short = 'x', long, num_args = 1.., value_name = "QUERY")]
    pub exclude: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve queries and print the matching track paths
    #[command(after_help = QUERY_HELP)]
    Find {
        #[command(flatten)]
        query: QueryArgs,

        /// Print the paths as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Resolve queries and play the tracks with mpv
    #[command(after_help = QUERY_HELP)]
    Play {
        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        player: PlayerArgs,

        /// Just print the found tracks instead of playing them
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Generate shell completions
    ///
    /// Usage: musplay completion bash > ~/.local/share/bash-completion/completions/musplay
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },

    /// List playlist names for completion (hidden command)
    #[command(hide = true)]
    CompletePlaylists,
}

/// mpv options.
#[derive(ClapArgs, Debug, Clone)]
pub struct PlayerArgs {
    /// Shuffle the found tracks (drops duplicates)
    #[arg(short, long)]
    pub shuffle: bool,

    /// Show the tracks in a GUI window
    #[arg(short, long)]
    pub window: bool,

    /// Keep the GUI window open after the last track has finished
    #[arg(short, long, requires = "window")]
    pub keep_open: bool,

    /// Play to this output device (see `mpv --audio-device=help`)
    #[arg(short, long, value_name = "DEVICE")]
    pub audio_device: Option<String>,

    /// The volume to start playing at
    #[arg(short, long, default_value_t = DEFAULT_VOLUME, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub volume: u8,

    /// Loop the tracks
    #[arg(short, long = "loop")]
    pub looping: bool,

    /// Pass an argument directly to mpv (repeatable)
    #[arg(long = "mpv", value_name = "ARG", allow_hyphen_values = true)]
    pub mpv_args: Vec<String>,
}

impl From<PlayerArgs> for PlayerOptions {
    fn from(args: PlayerArgs) -> Self {
        Self {
            window: args.window,
            keep_open: args.keep_open,
            shuffle: args.shuffle,
            audio_device: args.audio_device,
            volume: Some(args.volume),
            looping: args.looping,
            extra_args: args.mpv_args,
        }
    }
}
