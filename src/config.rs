//! Default flags read from flag files.
//!
//! A flag file holds command-line flags, any number per line; `#` starts a
//! comment line. Defaults come from the user file (under
//! `$XDG_CONFIG_HOME/linkpad/config`) merged with `./.linkpadrc`, and flags
//! given on the command line win over both.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::editor::EmptyLines;

const LOCAL_FILE: &str = ".linkpadrc";
const SAVED_HEADER: &str = "# linkpad defaults (saved with --save)";

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub show_empty_lines: bool,
    pub echo: bool,
    pub check: bool,
    /// `--perf`: timing summary on stderr.
    pub timing: bool,
    /// `--debug-log PATH`: per-command journal file.
    pub debug_log: Option<PathBuf>,
}

impl ConfigFlags {
    /// Collect the flags this crate knows from `tokens`, ignoring the rest.
    ///
    /// `--debug-log` takes its path as the next token or after `=`. A
    /// trailing `--debug-log` with no path is ignored.
    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        let mut tokens = tokens.into_iter();
        while let Some(token) = tokens.next() {
            match token.as_ref() {
                "--show-empty-lines" => flags.show_empty_lines = true,
                "--echo" => flags.echo = true,
                "--check" => flags.check = true,
                "--perf" => flags.timing = true,
                "--debug-log" => {
                    if let Some(path) = tokens.next() {
                        flags.debug_log = Some(PathBuf::from(path.as_ref()));
                    }
                }
                other => {
                    if let Some(path) = other.strip_prefix("--debug-log=") {
                        flags.debug_log = Some(PathBuf::from(path));
                    }
                }
            }
        }
        flags
    }

    /// The flags as tokens, one flag (with its value) per entry.
    pub fn to_tokens(&self) -> Vec<String> {
        let switches = [
            (self.show_empty_lines, "--show-empty-lines"),
            (self.echo, "--echo"),
            (self.check, "--check"),
            (self.timing, "--perf"),
        ];
        let mut tokens = switches
            .into_iter()
            .filter(|(on, _)| *on)
            .map(|(_, flag)| flag.to_string())
            .collect::<Vec<_>>();
        if let Some(path) = &self.debug_log {
            tokens.push(format!("--debug-log {}", path.display()));
        }
        tokens
    }

    /// Merge `other` over `self`: switches are or-ed, `other`'s path wins.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            show_empty_lines: self.show_empty_lines || other.show_empty_lines,
            echo: self.echo || other.echo,
            check: self.check || other.check,
            timing: self.timing || other.timing,
            debug_log: other.debug_log.clone().or_else(|| self.debug_log.clone()),
        }
    }

    pub const fn empty_lines(&self) -> EmptyLines {
        if self.show_empty_lines {
            EmptyLines::Render
        } else {
            EmptyLines::Suppress
        }
    }
}

/// The user flag file, or the local one when no config directory is known.
pub fn global_config_path() -> PathBuf {
    std::env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map_or_else(local_override_path, |dir| dir.join("linkpad").join("config"))
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(LOCAL_FILE)
}

/// Read a flag file. A missing file yields no flags.
pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    Ok(ConfigFlags::from_tokens(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.starts_with('#'))
            .flat_map(str::split_whitespace),
    ))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    let mut content = format!("{SAVED_HEADER}\n");
    for token in flags.to_tokens() {
        content.push_str(&token);
        content.push('\n');
    }
    fs::write(path, content).with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("Failed to remove {}", path.display())),
    }
}
