//! TUI runtime - owns terminal and state, runs the event loop, executes
//! effects.
//!
//! All side effects happen here. The reducer only mutates state and returns
//! effects; the runtime executes them. The loop is fully synchronous: block
//! on the next terminal event, run it through the reducer, execute effects,
//! redraw.

use std::fs;
use std::io::Stdout;
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::event;
use indibot_core::Bucket;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::debug;

use crate::effects::UiEffect;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on exit and on
/// panic.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
}

impl TuiRuntime {
    /// Creates a new TUI runtime with an empty store and the echo replier.
    pub fn new() -> Result<Self> {
        // Set up the panic hook BEFORE entering the alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        Ok(Self {
            terminal,
            state: AppState::new(),
        })
    }

    /// Runs the main event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let result = self.event_loop();
        let restored = terminal::restore_terminal();
        result.and(restored)
    }

    fn event_loop(&mut self) -> Result<()> {
        while !self.state.should_quit {
            self.terminal
                .draw(|frame| render::render(&self.state, frame))
                .context("Failed to draw frame")?;

            // Blocks until the next UI event; every event maps to at most
            // one store operation followed by a full redraw.
            let event = event::read().context("Failed to read terminal event")?;
            let effects = update::update(&mut self.state, &event);
            for effect in effects {
                self.execute_effect(effect);
            }
        }
        Ok(())
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Export { id, bucket } => self.export_session(&id, bucket),
        }
    }

    /// Writes the transcript of a session to `<title>.txt` in the working
    /// directory and reports the outcome in the status line.
    fn export_session(&mut self, id: &str, bucket: Bucket) {
        let Some(text) = self.state.store.export(id, bucket) else {
            return;
        };
        let title = self
            .state
            .store
            .get(id, bucket)
            .map(|session| session.title.clone())
            .unwrap_or_default();
        let path = export_path(&title);

        self.state.status = Some(match fs::write(&path, text) {
            Ok(()) => {
                debug!(id = %id, path = %path.display(), "exported session");
                format!("Exported to {}", path.display())
            }
            Err(err) => format!("Export failed: {err}"),
        });
    }
}

/// Builds the export file name from a session title.
///
/// Path separators and control characters are replaced so the title cannot
/// escape the working directory.
fn export_path(title: &str) -> PathBuf {
    let stem: String = title
        .trim()
        .chars()
        .map(|ch| {
            if matches!(ch, '/' | '\\' | ':') || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();
    let stem = if stem.is_empty() {
        "chat".to_string()
    } else {
        stem
    };
    PathBuf::from(format!("{stem}.txt"))
}
