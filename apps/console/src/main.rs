//! # Widgetry Console Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Widgetry Console                                 │
//! │                                                                         │
//! │  stdin ──► commands/ ──► Session ──► render ──► stdout                  │
//! │                            │                                            │
//! │            ┌───────────────┼────────────────┐                           │
//! │            ▼               ▼                ▼                           │
//! │       Calculator     ItemListStore      ThemeStore                      │
//! │       (memory)             │                │                           │
//! │                            └───────┬────────┘                           │
//! │                                    ▼                                    │
//! │                        Storage (memory | storage.json)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Flag parsing lives here; the rest is in lib.rs for testability.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "widgetry-console",
    version,
    about = "Calculator, item list and theme toggle in the terminal"
)]
struct Cli {
    /// Config file (default: widgetry.toml in the platform config dir)
    #[arg(long, env = "WIDGETRY_CONFIG")]
    config: Option<PathBuf>,

    /// Keep all state in memory for this session
    #[arg(long)]
    memory: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    widgetry_console::run(widgetry_console::Options {
        config: cli.config,
        memory: cli.memory,
    })
}
