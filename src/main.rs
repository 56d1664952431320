//! Linkpad - a linked-list text buffer driven by editing commands.
//!
//! # Usage
//!
//! ```bash
//! printf 'I h\nI i\nP\nQ\n' | linkpad
//! linkpad --show-empty-lines script.txt
//! linkpad --check --debug-log commands.log script.txt
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use linkpad::app::App;
use linkpad::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    save_config_flags,
};

/// A linked-list text buffer driven by single-letter commands
#[derive(Parser, Debug)]
#[command(name = "linkpad", version, about, long_about = None)]
struct Cli {
    /// Command script to run (reads stdin when omitted)
    #[arg(value_name = "SCRIPT")]
    script: Option<PathBuf>,

    /// Print empty lines as a bare newline instead of nothing
    #[arg(long)]
    show_empty_lines: bool,

    /// Echo each command to stderr as it is applied
    #[arg(long)]
    echo: bool,

    /// Verify buffer structure after every command
    #[arg(long)]
    check: bool,

    /// Print a timing summary when the session ends
    #[arg(long)]
    perf: bool,

    /// Journal every command, cursor move and edit case to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging; stdout carries only printed text.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = ConfigFlags::from_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    let journal_path = effective
        .debug_log
        .clone()
        .or_else(|| std::env::var_os("LINKPAD_DEBUG_LOG").map(PathBuf::from));

    let app = App::new()
        .with_empty_lines(effective.empty_lines())
        .with_echo(effective.echo)
        .with_check(effective.check)
        .with_timing(effective.timing)
        .with_journal(journal_path);

    let stdout = io::stdout();
    let session = match &cli.script {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            app.run(BufReader::new(file), stdout.lock())
        }
        None => app.run(io::stdin().lock(), stdout.lock()),
    }
    .context("Session error")?;

    tracing::debug!(position = %session.position(), "exit");
    Ok(())
}
