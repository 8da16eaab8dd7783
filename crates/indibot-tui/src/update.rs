//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(state, event)`
//! and executes the returned effects. Each UI event maps to at most one
//! store operation, followed by a full re-render.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use indibot_core::Bucket;

use crate::effects::UiEffect;
use crate::input::InputState;
use crate::state::{AppState, Focus, Overlay, RenameState, SidebarRow};

/// Wrapped lines scrolled per PageUp/PageDown press.
const PAGE_SCROLL_LINES: usize = 10;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(state: &mut AppState, event: &Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(state, *key),
        Event::Paste(text) => {
            handle_paste(state, text);
            vec![]
        }
        // A resize triggers a redraw by itself; nothing to update.
        _ => vec![],
    }
}

fn handle_paste(state: &mut AppState, text: &str) {
    if let Some(Overlay::Rename(ref mut rename)) = state.overlay {
        rename.input.insert_str(text);
    } else if state.focus == Focus::Input {
        state.input.insert_str(text);
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if matches!(key.kind, KeyEventKind::Release) {
        return vec![];
    }

    // Status messages are transient: any key press dismisses them.
    state.status = None;

    if state.overlay.is_some() {
        handle_rename_key(state, key);
        return vec![];
    }

    // Global bindings, independent of focus
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c' | 'q') if ctrl => {
            state.should_quit = true;
            return vec![];
        }
        KeyCode::Char('n') if ctrl => {
            state.store.create();
            state.focus = Focus::Input;
            state.sidebar_cursor = 0;
            state.scroll_from_bottom = 0;
            return vec![];
        }
        KeyCode::Tab | KeyCode::BackTab => {
            state.focus = match state.focus {
                Focus::Sidebar => Focus::Input,
                Focus::Input => Focus::Sidebar,
            };
            return vec![];
        }
        KeyCode::PageUp => {
            state.scroll_from_bottom = state.scroll_from_bottom.saturating_add(PAGE_SCROLL_LINES);
            return vec![];
        }
        KeyCode::PageDown => {
            state.scroll_from_bottom = state.scroll_from_bottom.saturating_sub(PAGE_SCROLL_LINES);
            return vec![];
        }
        _ => {}
    }

    match state.focus {
        Focus::Input => handle_input_key(state, key),
        Focus::Sidebar => handle_sidebar_key(state, key),
    }
}

fn handle_input_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.code == KeyCode::Enter {
        submit_input(state);
        return vec![];
    }
    state.input.input(key);
    vec![]
}

/// Submits the chat input to the current session.
///
/// Empty or whitespace-only input never reaches the store. The reply is
/// generated synchronously, so by the next render the transcript already
/// holds both the user message and the assistant reply.
fn submit_input(state: &mut AppState) {
    if state.input.is_blank() {
        return;
    }
    let Some(id) = state.store.current_session().map(|s| s.id.clone()) else {
        state.status = Some("No chat selected. Start one with Ctrl+N.".to_string());
        return;
    };
    let text = state.input.take();
    state.store.submit(&id, &text, state.replier.as_ref());
    state.scroll_from_bottom = 0;
}

fn handle_sidebar_key(state: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let rows = state.sidebar_rows();

    match key.code {
        KeyCode::Up => {
            state.sidebar_cursor = state.sidebar_cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if state.sidebar_cursor + 1 < rows.len() {
                state.sidebar_cursor += 1;
            }
        }
        KeyCode::Enter => {
            if let Some(row) = state.cursor_row() {
                open_row(state, &row);
            }
        }
        KeyCode::Esc => {
            state.store.clear_selection();
        }
        KeyCode::Char('r') => {
            if let Some(row) = state.cursor_row() {
                let title = state
                    .store
                    .get(&row.id, row.bucket)
                    .map(|session| session.title.clone())
                    .unwrap_or_default();
                state.overlay = Some(Overlay::Rename(RenameState {
                    id: row.id,
                    bucket: row.bucket,
                    input: InputState::with_text(title),
                }));
            }
        }
        KeyCode::Char('a') => {
            if let Some(row) = state.cursor_row()
                && row.bucket == Bucket::Active
            {
                state.store.archive(&row.id);
                state.clamp_sidebar_cursor();
            }
        }
        KeyCode::Char('u') => {
            if let Some(row) = state.cursor_row()
                && row.bucket == Bucket::Archived
            {
                state.store.restore(&row.id);
                state.clamp_sidebar_cursor();
            }
        }
        KeyCode::Char('d') => {
            if let Some(row) = state.cursor_row() {
                state.store.delete(&row.id, row.bucket);
                state.clamp_sidebar_cursor();
            }
        }
        KeyCode::Char('e') => {
            if let Some(row) = state.cursor_row() {
                return vec![UiEffect::Export {
                    id: row.id,
                    bucket: row.bucket,
                }];
            }
        }
        _ => {}
    }
    vec![]
}

fn open_row(state: &mut AppState, row: &SidebarRow) {
    match row.bucket {
        Bucket::Active => {
            state.store.select(row.id.clone());
            state.focus = Focus::Input;
            state.scroll_from_bottom = 0;
        }
        Bucket::Archived => {
            state.status = Some("Archived chats are read-only. Restore with 'u'.".to_string());
        }
    }
}

fn handle_rename_key(state: &mut AppState, key: KeyEvent) {
    let Some(Overlay::Rename(ref mut rename)) = state.overlay else {
        return;
    };
    match key.code {
        KeyCode::Esc => {
            state.overlay = None;
        }
        KeyCode::Enter => {
            // Store semantics: blank input silently leaves the title as-is.
            let id = rename.id.clone();
            let bucket = rename.bucket;
            let title = rename.input.text().to_string();
            state.store.rename(&id, bucket, &title);
            state.overlay = None;
        }
        _ => rename.input.input(key),
    }
}
