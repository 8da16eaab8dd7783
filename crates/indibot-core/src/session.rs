//! Session data model and transcript export.
//!
//! A [`Session`] is one conversation: an opaque id, a display title, the
//! creation timestamp, and an append-only list of messages. Sessions start
//! with the sentinel title [`DEFAULT_TITLE`] and take their real title from
//! the first non-empty user message (or an explicit rename).

use chrono::NaiveDateTime;

/// Sentinel title for sessions that have not been titled yet.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Maximum title length produced by auto-titling, in characters.
pub const TITLE_MAX_CHARS: usize = 40;

/// Width of the separator line in exported transcripts.
const EXPORT_SEPARATOR_WIDTH: usize = 40;

/// Timestamp format used in exported transcripts.
const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Returns the capitalized display label, as used in exports.
    pub fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One turn in a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// One conversation.
///
/// `id` and `created_at` are set at creation and never change afterwards.
/// `messages` is append-only.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub created_at: NaiveDateTime,
    pub messages: Vec<Message>,
}

impl Session {
    /// Creates an empty session with a generated id and the sentinel title.
    pub fn new() -> Self {
        Self {
            id: generate_session_id(),
            title: DEFAULT_TITLE.to_string(),
            created_at: chrono::Local::now().naive_local(),
            messages: Vec::new(),
        }
    }

    /// Returns the creation timestamp formatted for display and export.
    pub fn created_display(&self) -> String {
        self.created_at.format(EXPORT_TIMESTAMP_FORMAT).to_string()
    }

    /// Sets the title from the first non-empty user message, if the session
    /// still carries the sentinel title.
    ///
    /// The title is the first [`TITLE_MAX_CHARS`] characters of the trimmed
    /// content. Hard character cutoff, not word-boundary aware.
    pub fn autotitle(&mut self) {
        if self.title != DEFAULT_TITLE {
            return;
        }
        for message in &self.messages {
            if message.role == Role::User && !message.content.trim().is_empty() {
                self.title = message.content.trim().chars().take(TITLE_MAX_CHARS).collect();
                break;
            }
        }
    }

    /// Renders the transcript in the export format.
    ///
    /// Header with title and creation timestamp, a dashed separator, then one
    /// `<Role>: <content>` line per message in stored order. Lines are joined
    /// with `\n` and there is no trailing newline.
    pub fn export(&self) -> String {
        let mut lines = vec![
            format!("Title: {}", self.title),
            format!("Created: {}", self.created_display()),
            "-".repeat(EXPORT_SEPARATOR_WIDTH),
        ];
        for message in &self.messages {
            lines.push(format!("{}: {}", message.role.label(), message.content));
        }
        lines.join("\n")
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Generates a unique session id using UUID v4.
fn generate_session_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
