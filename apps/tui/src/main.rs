//! daybrief TUI — interactive morning-briefing dashboard.
//!
//! Tabs for the classified briefing (collapsible cards), source links with
//! origin-tag filtering, the to-do list, and notes, built with
//! `ratatui` + `crossterm`.

mod app;
mod screens;
mod store;
mod widgets;

use color_eyre::eyre::Result;

fn main() -> Result<()> {
    color_eyre::install()?;
    app::run()
}
