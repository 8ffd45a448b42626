//! # Widgetry Console Library
//!
//! Core library for the Widgetry console host. `main.rs` only parses
//! flags; everything else starts here.
//!
//! ## Module Organization
//! ```text
//! widgetry_console/
//! ├── lib.rs          ◄─── You are here (startup & input loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── WidgetryConfig
//! │   ├── storage.rs  ◄─── Memory or file backend
//! │   └── session.rs  ◄─── The three widgets
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command parsing & dispatch
//! │   ├── calculator.rs
//! │   ├── list.rs
//! │   └── theme.rs
//! └── error.rs        ◄─── Error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod state;

use anyhow::Context;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use commands::{Command, Outcome};
use state::{Session, StorageBackend, WidgetryConfig};

/// Startup options from the command line.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Explicit config file; the platform config dir otherwise.
    pub config: Option<PathBuf>,

    /// Force in-memory storage regardless of configuration.
    pub memory: bool,
}

/// Runs the console host until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Default: info,widgetry=debug, can be overridden with RUST_LOG     │
/// │                                                                         │
/// │  2. Load Configuration ───────────────────────────────────────────────► │
/// │     • defaults → widgetry.toml → WIDGETRY_* variables                   │
/// │                                                                         │
/// │  3. Open Storage ─────────────────────────────────────────────────────► │
/// │     • Linux: ~/.local/share/widgetry/storage.json                       │
/// │     • or memory with --memory / WIDGETRY_STORAGE=memory                 │
/// │                                                                         │
/// │  4. Load Widgets ─────────────────────────────────────────────────────► │
/// │     • Item list (corrupt data → empty list)                             │
/// │     • Theme (unknown value → light)                                     │
/// │                                                                         │
/// │  5. Read commands from stdin, print output to stdout                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(options: Options) -> anyhow::Result<()> {
    init_tracing();
    info!("Starting Widgetry console");

    let mut config = WidgetryConfig::load(options.config).context("Failed to load configuration")?;
    if options.memory {
        config.storage.backend = StorageBackend::Memory;
    }

    let mut session = Session::open(&config).context("Failed to open storage")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", commands::theme::render(session.theme.theme()))?;
    writeln!(out, "Type `help` for commands.")?;

    repl(&mut session, stdin.lock(), &mut out)?;

    info!("Widgetry console finished");
    Ok(())
}

/// Reads commands from `input` and writes their output to `output`.
///
/// Blank lines and lines starting with `#` are skipped. Command errors are
/// written to `output` and the loop continues; only I/O on the streams
/// themselves can fail this function.
pub fn repl<R, W>(session: &mut Session, input: R, output: &mut W) -> io::Result<()>
where
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line.parse::<Command>().and_then(|cmd| cmd.execute(session)) {
            Ok(Outcome::Output(text)) => writeln!(output, "{}", text)?,
            Ok(Outcome::Quit) => break,
            Err(e) => {
                warn!(code = e.code.as_str(), message = %e.message, "Command failed");
                writeln!(output, "{}", e)?;
            }
        }
    }
    output.flush()
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=widgetry_store=trace` - Trace the storage layer only
/// - Default: info, debug for widgetry crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,widgetry=debug"));

    // A subscriber may already be installed by an embedding host
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Storage;
    use widgetry_store::MemoryStore;

    fn run_script(script: &str) -> String {
        let mut session = Session::with_storage(
            Storage::Memory(MemoryStore::new()),
            &WidgetryConfig::default(),
        )
        .unwrap();
        let mut out = Vec::new();
        repl(&mut session, script.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_repl_runs_until_quit() {
        let out = run_script("calc 2 + 3 =\nquit\ncalc 9\n");
        assert!(out.trim_end().ends_with('5'));
        assert!(!out.contains('9'));
    }

    #[test]
    fn test_repl_skips_blank_and_comment_lines() {
        let out = run_script("\n# a comment\n   \nlist\n");
        assert_eq!(out.trim(), commands::list::EMPTY_LIST);
    }

    #[test]
    fn test_repl_continues_after_error() {
        let out = run_script("bogus\nremove 7\ntheme\n");
        assert!(out.contains("error[USAGE]"));
        assert!(out.contains("error[NOT_FOUND]"));
        assert!(out.contains("Theme: light"));
    }
}
