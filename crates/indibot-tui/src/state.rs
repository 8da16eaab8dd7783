//! Application state for the TUI.
//!
//! `AppState` owns the session store and all view state. The reducer in
//! `update.rs` is the only place that mutates it; `render.rs` only reads it.

use indibot_core::{Bucket, EchoReplier, Replier, SessionStore};

use crate::input::InputState;

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Input,
}

/// Modal overlays. Only one can be open at a time.
#[derive(Debug)]
pub enum Overlay {
    Rename(RenameState),
}

/// State of the rename overlay.
#[derive(Debug)]
pub struct RenameState {
    pub id: String,
    pub bucket: Bucket,
    pub input: InputState,
}

/// One selectable row in the sidebar.
///
/// The sidebar shows active sessions first (newest first), then archived
/// ones under the "Library" heading. Rows are recomputed from the store on
/// demand so the list can never go stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarRow {
    pub id: String,
    pub bucket: Bucket,
}

/// TUI application state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// The session store (all conversation state lives here).
    pub store: SessionStore,
    /// Reply generator invoked on submit.
    pub replier: Box<dyn Replier>,
    /// Which pane receives key input.
    pub focus: Focus,
    /// Chat input line.
    pub input: InputState,
    /// Cursor row in the sidebar list.
    pub sidebar_cursor: usize,
    /// Active overlay, if any.
    pub overlay: Option<Overlay>,
    /// Transcript scroll offset, in wrapped lines up from the bottom.
    pub scroll_from_bottom: usize,
    /// Transient status line message, cleared on the next key press.
    pub status: Option<String>,
}

impl AppState {
    /// Creates state with an empty store and the echo replier.
    pub fn new() -> Self {
        Self::with_replier(Box::new(EchoReplier))
    }

    /// Creates state with a custom reply generator.
    pub fn with_replier(replier: Box<dyn Replier>) -> Self {
        Self {
            should_quit: false,
            store: SessionStore::new(),
            replier,
            focus: Focus::Input,
            input: InputState::new(),
            sidebar_cursor: 0,
            overlay: None,
            scroll_from_bottom: 0,
            status: None,
        }
    }

    /// Returns the sidebar rows in display order.
    pub fn sidebar_rows(&self) -> Vec<SidebarRow> {
        let mut rows: Vec<SidebarRow> = self
            .store
            .active_sessions()
            .into_iter()
            .map(|session| SidebarRow {
                id: session.id.clone(),
                bucket: Bucket::Active,
            })
            .collect();
        rows.extend(
            self.store
                .archived_sessions()
                .into_iter()
                .map(|session| SidebarRow {
                    id: session.id.clone(),
                    bucket: Bucket::Archived,
                }),
        );
        rows
    }

    /// Returns the sidebar row under the cursor, if any.
    pub fn cursor_row(&self) -> Option<SidebarRow> {
        self.sidebar_rows().into_iter().nth(self.sidebar_cursor)
    }

    /// Clamps the sidebar cursor after rows were added or removed.
    pub fn clamp_sidebar_cursor(&mut self) {
        let len = self.sidebar_rows().len();
        self.sidebar_cursor = self.sidebar_cursor.min(len.saturating_sub(1));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
