//! Find music tracks from short-hand queries and playlists.
//!
//! Core modules:
//! - [`pattern`] - Fragment templates compiled into search patterns
//! - [`query`] - Query prefixes and classification
//! - [`resolver`] - Recursive query and playlist resolution
//! - [`search`] - Search backends (`ag`, directory walk, in-memory)
//!
//! ### Supporting Modules
//!
//! - [`config`] - Music and playlist directories
//! - [`playlist`] - Playlist file parsing
//! - [`player`] - mpv playback
//! - [`cli`] - Command-line interface definitions with clap integration
//! - [`completion`] - Shell completion generation
//!
//! ## Quick Start Example
//!
//! ```no_run
//! use musplay::config::Config;
//! use musplay::resolver::Resolver;
//! use anyhow::Result;
//!
//! # fn main() -> Result<()> {
//! let config = Config::with_music_dir("~/Music");
//! config.validate()?;
//!
//! let resolver = Resolver::from_config(config)?;
//! let resolution = resolver.resolve(["@Cascadia", "%road trip"])?;
//! for path in &resolution.paths {
//!     println!("{}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod completion;
pub mod config;
pub mod pattern;
pub mod player;
pub mod playlist;
pub mod query;
pub mod resolver;
pub mod search;
