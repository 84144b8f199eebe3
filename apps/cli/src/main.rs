//! daybrief CLI — morning briefing dashboard for the terminal.
//!
//! Fetches the pre-generated briefing JSON, renders it as classified
//! sections, and manages the locally persisted action items and notes.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
