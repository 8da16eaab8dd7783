//! Full-screen TUI implementation for IndiBot.
//!
//! Architecture:
//! - `TuiRuntime` (runtime.rs): owns terminal + state, runs the event loop,
//!   executes effects
//! - `AppState` (state.rs): all app state, no terminal
//! - `update()` (update.rs): the reducer, all state mutations happen here
//! - `render()` (render.rs): pure view, no mutations

pub mod effects;
pub mod input;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use runtime::TuiRuntime;

/// Runs the interactive chat shell until the user quits.
pub fn run() -> Result<()> {
    if !stdout().is_terminal() {
        anyhow::bail!("IndiBot requires a terminal.");
    }

    let mut runtime = TuiRuntime::new()?;
    runtime.run()?;

    // Print goodbye after the TUI exits (terminal restored)
    writeln!(stderr(), "Goodbye!")?;

    Ok(())
}
