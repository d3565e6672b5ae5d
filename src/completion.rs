//! # Shell Completion Module
//!
//! Completion scripts come from clap. Playlist names for `%` queries are
//! listed by the hidden `complete-playlists` command, which a shell can call
//! to offer them dynamically.
//!
//! ```bash
//! musplay completion bash > ~/.local/share/bash-completion/completions/musplay
//! musplay complete-playlists
//! ```

use crate::config::Config;
use crate::query::is_playlist_path;
use anyhow::Result;
use clap::Command;
use clap_complete::{generate, Generator, Shell as CompletionShell};
use ignore::WalkBuilder;
use std::collections::BTreeSet;
use std::io;

/// Generate shell completions for the given shell
pub fn generate_completions<G: Generator>(gen: G, cmd: &mut Command) {
    generate(gen, cmd, cmd.get_name().to_string(), &mut io::stdout());
}

/// Convert our Shell enum to clap_complete's Shell enum
pub fn shell_to_completion_shell(shell: &crate::cli::Shell) -> CompletionShell {
    match shell {
        crate::cli::Shell::Bash => CompletionShell::Bash,
        crate::cli::Shell::Zsh => CompletionShell::Zsh,
        crate::cli::Shell::Fish => CompletionShell::Fish,
        crate::cli::Shell::PowerShell => CompletionShell::PowerShell,
        crate::cli::Shell::Elvish => CompletionShell::Elvish,
    }
}

/// Playlist names (file stems) under the playlist directory, sorted and
/// deduplicated, each ready to use as a `%` query.
pub fn playlist_completions(config: &Config) -> Result<Vec<String>> {
    if !config.playlist_dir.is_dir() {
        return Ok(Vec::new());
    }

    let names: BTreeSet<String> = WalkBuilder::new(&config.playlist_dir)
        .build()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.is_file() && is_playlist_path(path))
        .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
        .collect();

    Ok(names.into_iter().map(|name| format!("%{name}")).collect())
}

/// Print playlist completions, one per line
pub fn print_playlist_completions(config: &Config) -> Result<()> {
    for name in playlist_completions(config)? {
        println!("{name}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Args, Shell};
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_shell_conversion() {
        assert_eq!(shell_to_completion_shell(&Shell::Bash), CompletionShell::Bash);
        assert_eq!(shell_to_completion_shell(&Shell::PowerShell), CompletionShell::PowerShell);
    }

    #[test]
    fn test_completion_script_mentions_binary() {
        let mut cmd = Args::command();
        let mut out = Vec::new();
        generate(CompletionShell::Bash, &mut cmd, "musplay", &mut out);
        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("musplay"));
    }

    #[test]
    fn test_playlist_completions() -> Result<()> {
        let temp = TempDir::new()?;
        fs::create_dir(temp.path().join("nested"))?;
        fs::write(temp.path().join("Road Trip.txt"), "@x")?;
        fs::write(temp.path().join("nested/Chill.txt"), "@y")?;
        fs::write(temp.path().join("cover.jpg"), "")?;

        let config = Config::with_dirs(temp.path(), temp.path());
        assert_eq!(playlist_completions(&config)?, vec!["%Chill", "%Road Trip"]);
        Ok(())
    }

    #[test]
    fn test_missing_playlist_dir_completes_nothing() -> Result<()> {
        let config = Config::with_dirs("/no/such/music", "/no/such/lists");
        assert!(playlist_completions(&config)?.is_empty());
        Ok(())
    }
}
