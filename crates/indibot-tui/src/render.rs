//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState` by immutable reference, draw to a ratatui
//! Frame, and never mutate state or return effects.

use indibot_core::{Role, Session};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::input::InputState;
use crate::state::{AppState, Focus, Overlay, RenameState};

/// Width of the session sidebar.
const SIDEBAR_WIDTH: u16 = 32;

/// Height of the input box (one text line plus borders).
const INPUT_HEIGHT: u16 = 3;

/// Height of the status line below the input box.
const STATUS_HEIGHT: u16 = 1;

/// Width of the rename overlay.
const RENAME_WIDTH: u16 = 50;

/// Key hints shown in the status line when no message is pending.
const KEY_HINTS: &str =
    "Ctrl+N new | Tab focus | Enter open/send | r rename | a archive | u restore | e export | d delete | Ctrl+Q quit";

/// Renders the entire TUI to the frame.
pub fn render(state: &AppState, frame: &mut Frame) {
    let area = frame.area();

    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)]).areas(area);
    let [transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(INPUT_HEIGHT),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(main_area);

    render_sidebar(state, frame, sidebar_area);
    render_transcript(state, frame, transcript_area);
    render_input(state, frame, input_area);
    render_status(state, frame, status_area);

    if let Some(Overlay::Rename(ref rename)) = state.overlay {
        render_rename_overlay(rename, frame, area);
    }
}

// ============================================================================
// Sidebar
// ============================================================================

fn render_sidebar(state: &AppState, frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Chats");
    let inner_width = area.width.saturating_sub(2) as usize;

    let active = state.store.active_sessions();
    let archived = state.store.archived_sessions();

    let mut lines: Vec<Line> = Vec::new();
    if active.is_empty() && archived.is_empty() {
        lines.push(Line::styled(
            "No chats yet. Start one!",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut row_index = 0usize;
    for session in &active {
        lines.push(session_line(state, session, row_index, inner_width, false));
        row_index += 1;
    }
    if !archived.is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled(
            "Library",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        ));
        for session in &archived {
            lines.push(session_line(state, session, row_index, inner_width, true));
            row_index += 1;
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn session_line(
    state: &AppState,
    session: &Session,
    row_index: usize,
    width: usize,
    archived: bool,
) -> Line<'static> {
    let selected = state.store.current_id() == Some(session.id.as_str());
    let marker = if selected { "> " } else { "  " };
    let title = truncate_to_width(&session.title, width.saturating_sub(2));

    let mut style = Style::default();
    if archived {
        style = style.fg(Color::DarkGray);
    }
    if state.focus == Focus::Sidebar && state.sidebar_cursor == row_index {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Line::styled(format!("{marker}{title}"), style)
}

// ============================================================================
// Transcript
// ============================================================================

fn render_transcript(state: &AppState, frame: &mut Frame, area: Rect) {
    let Some(session) = state.store.current_session() else {
        render_no_selection(frame, area);
        return;
    };

    let title = format!(" {} ({}) ", session.title, session.created_display());
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    let width = inner.width as usize;
    let height = inner.height as usize;

    let mut lines: Vec<Line> = Vec::new();
    for message in &session.messages {
        let (label, color) = match message.role {
            Role::User => ("You", Color::Cyan),
            Role::Assistant => ("Assistant", Color::Green),
        };
        lines.push(Line::styled(
            label,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        for wrapped in wrap_to_width(&message.content, width) {
            lines.push(Line::raw(wrapped));
        }
        lines.push(Line::default());
    }

    // Window the lines: scroll_from_bottom counts up from the latest line.
    let total = lines.len();
    let max_scroll = total.saturating_sub(height);
    let offset = max_scroll.saturating_sub(state.scroll_from_bottom.min(max_scroll));
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();

    frame.render_widget(Paragraph::new(visible).block(block), area);
}

fn render_no_selection(frame: &mut Frame, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" IndiBot ");
    let inner = block.inner(area);

    let mut lines = vec![Line::default(); (inner.height as usize).saturating_sub(2) / 2];
    lines.push(Line::styled(
        "No chat selected.",
        Style::default().fg(Color::DarkGray),
    ));
    lines.push(Line::styled(
        "Start a new chat with Ctrl+N.",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

// ============================================================================
// Input and status
// ============================================================================

fn render_input(state: &AppState, frame: &mut Frame, area: Rect) {
    let focused = state.focus == Focus::Input && state.overlay.is_none();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Message")
        .border_style(border_style);
    let inner = block.inner(area);

    let x_offset = render_input_text(&state.input, frame, area, block);
    if focused {
        set_input_cursor(&state.input, frame, inner, x_offset);
    }
}

/// Draws the buffer text inside `block`, horizontally scrolled so the cursor
/// stays visible. Returns the applied scroll offset in columns.
fn render_input_text(input: &InputState, frame: &mut Frame, area: Rect, block: Block) -> usize {
    let inner = block.inner(area);
    let x_offset = cursor_prefix_width(input)
        .saturating_sub((inner.width as usize).saturating_sub(1));
    let paragraph = Paragraph::new(input.text())
        .block(block)
        .scroll((0, x_offset as u16));
    frame.render_widget(paragraph, area);
    x_offset
}

fn set_input_cursor(input: &InputState, frame: &mut Frame, inner: Rect, x_offset: usize) {
    let x = inner.x + (cursor_prefix_width(input) - x_offset) as u16;
    frame.set_cursor_position(Position::new(x, inner.y));
}

/// Display width of the text before the cursor.
fn cursor_prefix_width(input: &InputState) -> usize {
    let prefix: String = input.text().chars().take(input.cursor()).collect();
    UnicodeWidthStr::width(prefix.as_str())
}

fn render_status(state: &AppState, frame: &mut Frame, area: Rect) {
    let line = match state.status {
        Some(ref message) => Line::styled(message.clone(), Style::default().fg(Color::Yellow)),
        None => Line::styled(KEY_HINTS, Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(Paragraph::new(line), area);
}

// ============================================================================
// Rename overlay
// ============================================================================

fn render_rename_overlay(rename: &RenameState, frame: &mut Frame, area: Rect) {
    let popup = centered_rect(RENAME_WIDTH.min(area.width), INPUT_HEIGHT, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Rename chat")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(popup);

    let x_offset = render_input_text(&rename.input, frame, popup, block);
    set_input_cursor(&rename.input, frame, inner, x_offset);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

// ============================================================================
// Text helpers
// ============================================================================

/// Truncates `text` to `width` display columns, appending an ellipsis when
/// something was cut.
fn truncate_to_width(text: &str, width: usize) -> String {
    if UnicodeWidthStr::width(text) <= width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + ch_width > width.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += ch_width;
    }
    out.push('…');
    out
}

/// Greedy word wrap to `width` display columns.
///
/// Words wider than a full line (URLs and the like) are hard-broken.
fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut out = Vec::new();

    for raw in text.split('\n') {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line = String::new();
        let mut line_width = 0usize;
        for word in words {
            let word_width = UnicodeWidthStr::width(word);
            if line_width > 0 {
                if line_width + 1 + word_width <= width {
                    line.push(' ');
                    line.push_str(word);
                    line_width += 1 + word_width;
                    continue;
                }
                out.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if word_width <= width {
                line.push_str(word);
                line_width = word_width;
            } else {
                for ch in word.chars() {
                    let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
                    if line_width + ch_width > width && line_width > 0 {
                        out.push(std::mem::take(&mut line));
                        line_width = 0;
                    }
                    line.push(ch);
                    line_width += ch_width;
                }
            }
        }
        if !line.is_empty() {
            out.push(line);
        }
    }

    out
}
