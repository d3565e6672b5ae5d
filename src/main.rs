//! # musplay
//!
//! Finds music tracks from short-hand queries and plays them with mpv.
//!
//! ## Usage
//!
//! ```bash
//! # Print every track titled like "Cascadia" and everything on an album "Icarus EP"
//! musplay find '@Cascadia' '@@Icarus EP'
//!
//! # Play a playlist, shuffled, without anything from live albums
//! musplay play -s '%road trip' -x '@@Live'
//!
//! # Print a shell completion script
//! musplay completion zsh
//! ```

use anyhow::{bail, Result};
use clap::{CommandFactory, Parser};
use log::{debug, info, LevelFilter};
use musplay::cli::{self, Args, QueryArgs};
use musplay::completion;
use musplay::config::Config;
use musplay::player;
use musplay::resolver::{Resolution, Resolver};
use std::path::PathBuf;

/// Main entry point.
///
/// # Logging
///
/// Warnings are shown by default, `--debug` shows the resolution trace and
/// `--quiet` hides warnings. `RUST_LOG` overrides both:
/// - `RUST_LOG=musplay::resolver=trace musplay find '%mix'`
fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args);

    match args.command {
        cli::Command::Find { ref query, json } => {
            let paths = find(&args, query)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                print_paths(&paths);
            }
        }
        cli::Command::Play { ref query, ref player, dry_run } => {
            let paths = find(&args, query)?;
            if dry_run {
                print_paths(&paths);
            } else {
                player::play(paths, &player.clone().into())?;
            }
        }
        cli::Command::Completion { shell } => {
            let mut cmd = Args::command();
            completion::generate_completions(completion::shell_to_completion_shell(&shell), &mut cmd);
        }
        cli::Command::CompletePlaylists => {
            completion::print_playlist_completions(&config(&args)?)?;
        }
    }

    Ok(())
}

fn init_logging(args: &Args) {
    let level = if args.debug {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .parse_default_env()
        .init();
}

fn config(args: &Args) -> Result<Config> {
    let mut config = Config::from_sources(args.music_dir.clone(), args.playlist_dir.clone())?;
    config.escape_terms = !args.raw_terms;
    config.backend = args.backend;
    Ok(config)
}

/// Resolve the queries of a `find` or `play` command.
fn find(args: &Args, query: &QueryArgs) -> Result<Vec<PathBuf>> {
    let config = config(args)?;
    config.validate()?;

    let resolver = Resolver::from_config(config)?;
    let Resolution { paths, warnings, stats } = resolver.resolve_excluding(&query.queries, &query.exclude)?;

    debug!(
        "Loaded {} playlists ({} reused) with {} searches",
        stats.playlists_loaded, stats.cache_hits, stats.searches
    );
    if !warnings.is_empty() {
        info!("{} warnings while resolving", warnings.len());
    }

    if paths.is_empty() {
        bail!("No tracks found :(");
    }
    Ok(paths)
}

fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}
