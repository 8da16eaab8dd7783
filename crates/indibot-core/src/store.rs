//! In-memory session store.
//!
//! [`SessionStore`] owns two disjoint maps of sessions, `active` and
//! `archived`, plus the current-selection pointer. All operations are
//! synchronous and immediately consistent; operations on missing ids degrade
//! to no-ops rather than errors, so stale UI references never crash the
//! shell.
//!
//! State is volatile: the store lives for one UI session and nothing is
//! persisted across restarts.

use std::collections::HashMap;

use tracing::debug;

use crate::reply::Replier;
use crate::session::{Message, Role, Session};

/// Which of the two session maps an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Active,
    Archived,
}

/// Owns all sessions and the current-selection pointer.
///
/// Invariant: a session id exists in at most one of the two maps at any
/// time. Archive and restore move sessions between maps atomically with
/// respect to the single caller; delete removes with no tombstone.
#[derive(Debug, Default)]
pub struct SessionStore {
    active: HashMap<String, Session>,
    archived: HashMap<String, Session>,
    current: Option<String>,
}

impl SessionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty session, selects it, and returns its id.
    pub fn create(&mut self) -> String {
        let session = Session::new();
        let id = session.id.clone();
        debug!(id = %id, "created session");
        self.active.insert(id.clone(), session);
        self.current = Some(id.clone());
        id
    }

    /// Sets the current-selection pointer.
    ///
    /// Existence is not validated; the view falls back to the "start a new
    /// chat" prompt when the selected id is missing from `active`.
    pub fn select(&mut self, id: impl Into<String>) {
        self.current = Some(id.into());
    }

    /// Clears the current-selection pointer.
    pub fn clear_selection(&mut self) {
        self.current = None;
    }

    /// Returns the currently selected id, if any.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Returns the currently selected session, if it is still active.
    ///
    /// Archived sessions are not open-able for continued chat, so the
    /// selection only resolves against the active map.
    pub fn current_session(&self) -> Option<&Session> {
        self.current.as_ref().and_then(|id| self.active.get(id))
    }

    /// Looks up a session by id in the given bucket.
    pub fn get(&self, id: &str, bucket: Bucket) -> Option<&Session> {
        self.sessions(bucket).get(id)
    }

    /// Renames the session at `id` in `bucket`.
    ///
    /// The new title is trimmed first. Empty or whitespace-only input leaves
    /// the title unchanged, so a set title can never revert to the sentinel.
    /// No-op if the id is absent.
    pub fn rename(&mut self, id: &str, bucket: Bucket, new_title: &str) {
        let trimmed = new_title.trim();
        if trimmed.is_empty() {
            return;
        }
        if let Some(session) = self.sessions_mut(bucket).get_mut(id) {
            debug!(id = %id, title = %trimmed, "renamed session");
            session.title = trimmed.to_string();
        }
    }

    /// Deletes the session at `id` from `bucket`, if present. Idempotent.
    ///
    /// Clears the selection pointer if it pointed at the deleted session.
    /// There is no undo.
    pub fn delete(&mut self, id: &str, bucket: Bucket) {
        if self.sessions_mut(bucket).remove(id).is_some() {
            debug!(id = %id, ?bucket, "deleted session");
            if self.current.as_deref() == Some(id) {
                self.current = None;
            }
        }
    }

    /// Moves the session at `id` from `active` to `archived`.
    ///
    /// Clears the selection pointer if it pointed at the archived session.
    /// No-op if the id is not active.
    pub fn archive(&mut self, id: &str) {
        if let Some(session) = self.active.remove(id) {
            debug!(id = %id, "archived session");
            self.archived.insert(session.id.clone(), session);
            if self.current.as_deref() == Some(id) {
                self.current = None;
            }
        }
    }

    /// Moves the session at `id` from `archived` back to `active`.
    ///
    /// The selection pointer is unchanged. No-op if the id is not archived.
    pub fn restore(&mut self, id: &str) {
        if let Some(session) = self.archived.remove(id) {
            debug!(id = %id, "restored session");
            self.active.insert(session.id.clone(), session);
        }
    }

    /// Renders the transcript of the session at `id` in `bucket`.
    ///
    /// Pure read; returns `None` if the id is absent.
    pub fn export(&self, id: &str, bucket: Bucket) -> Option<String> {
        self.sessions(bucket).get(id).map(Session::export)
    }

    /// Appends a message to an active session.
    ///
    /// Archived sessions do not accept new messages. After appending a user
    /// message, auto-titling runs (see [`Session::autotitle`]).
    pub fn append_message(&mut self, id: &str, role: Role, content: impl Into<String>) {
        let Some(session) = self.active.get_mut(id) else {
            return;
        };
        session.messages.push(Message {
            role,
            content: content.into(),
        });
        if role == Role::User {
            session.autotitle();
        }
    }

    /// Submits user text to an active session and appends the generated
    /// reply.
    ///
    /// The replier is invoked synchronously with the full history including
    /// the just-appended user message. No-op if the id is not active.
    pub fn submit(&mut self, id: &str, text: &str, replier: &dyn Replier) {
        if !self.active.contains_key(id) {
            return;
        }
        self.append_message(id, Role::User, text);
        // Lookup again: append_message released the borrow.
        let Some(session) = self.active.get(id) else {
            return;
        };
        let reply = replier.generate_reply(text, &session.messages);
        self.append_message(id, Role::Assistant, reply);
    }

    /// Lists active sessions, newest first.
    pub fn active_sessions(&self) -> Vec<&Session> {
        Self::sorted(&self.active)
    }

    /// Lists archived sessions, newest first.
    pub fn archived_sessions(&self) -> Vec<&Session> {
        Self::sorted(&self.archived)
    }

    /// Returns true if the store holds no sessions in either bucket.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.archived.is_empty()
    }

    fn sessions(&self, bucket: Bucket) -> &HashMap<String, Session> {
        match bucket {
            Bucket::Active => &self.active,
            Bucket::Archived => &self.archived,
        }
    }

    fn sessions_mut(&mut self, bucket: Bucket) -> &mut HashMap<String, Session> {
        match bucket {
            Bucket::Active => &mut self.active,
            Bucket::Archived => &mut self.archived,
        }
    }

    /// Sorts sessions by creation time, newest first. Ties break on id so
    /// the order is stable across renders.
    fn sorted(sessions: &HashMap<String, Session>) -> Vec<&Session> {
        let mut list: Vec<&Session> = sessions.values().collect();
        list.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reply::EchoReplier;
    use crate::session::DEFAULT_TITLE;

    fn store_with_session() -> (SessionStore, String) {
        let mut store = SessionStore::new();
        let id = store.create();
        (store, id)
    }

    #[test]
    fn create_inserts_active_session_and_selects_it() {
        let (store, id) = store_with_session();
        assert_eq!(store.current_id(), Some(id.as_str()));
        let session = store.get(&id, Bucket::Active).unwrap();
        assert_eq!(session.title, DEFAULT_TITLE);
        assert!(session.messages.is_empty());
        assert!(store.get(&id, Bucket::Archived).is_none());
    }

    #[test]
    fn select_does_not_validate_existence() {
        let mut store = SessionStore::new();
        store.select("no-such-id");
        assert_eq!(store.current_id(), Some("no-such-id"));
        assert!(store.current_session().is_none());
    }

    #[test]
    fn rename_trims_and_sets_title() {
        let (mut store, id) = store_with_session();
        store.rename(&id, Bucket::Active, "  Trip planning  ");
        assert_eq!(store.get(&id, Bucket::Active).unwrap().title, "Trip planning");
    }

    #[test]
    fn rename_with_whitespace_only_is_a_noop() {
        let (mut store, id) = store_with_session();
        store.rename(&id, Bucket::Active, "   ");
        assert_eq!(store.get(&id, Bucket::Active).unwrap().title, DEFAULT_TITLE);
    }

    #[test]
    fn rename_missing_id_is_a_noop() {
        let mut store = SessionStore::new();
        store.rename("ghost", Bucket::Active, "title");
        assert!(store.is_empty());
    }

    #[test]
    fn rename_works_in_archived_bucket() {
        let (mut store, id) = store_with_session();
        store.archive(&id);
        store.rename(&id, Bucket::Archived, "kept");
        assert_eq!(store.get(&id, Bucket::Archived).unwrap().title, "kept");
    }

    #[test]
    fn delete_removes_session_and_clears_selection() {
        let (mut store, id) = store_with_session();
        store.delete(&id, Bucket::Active);
        assert!(store.get(&id, Bucket::Active).is_none());
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn delete_missing_id_is_idempotent() {
        let (mut store, id) = store_with_session();
        store.delete(&id, Bucket::Active);
        store.delete(&id, Bucket::Active);
        assert!(store.get(&id, Bucket::Active).is_none());
    }

    #[test]
    fn delete_wrong_bucket_is_a_noop() {
        let (mut store, id) = store_with_session();
        store.delete(&id, Bucket::Archived);
        assert!(store.get(&id, Bucket::Active).is_some());
    }

    #[test]
    fn delete_wrong_bucket_keeps_selection() {
        let (mut store, id) = store_with_session();
        // Stale UI reference: the selected session lives in active, but the
        // delete names the archived bucket. Nothing is removed, so the
        // selection pointer must survive too.
        store.delete(&id, Bucket::Archived);
        assert_eq!(store.current_id(), Some(id.as_str()));
    }

    #[test]
    fn delete_missing_id_keeps_selection() {
        let (mut store, id) = store_with_session();
        store.delete("ghost", Bucket::Active);
        assert_eq!(store.current_id(), Some(id.as_str()));
    }

    #[test]
    fn archive_moves_between_buckets_and_clears_selection() {
        let (mut store, id) = store_with_session();
        store.archive(&id);
        assert!(store.get(&id, Bucket::Active).is_none());
        assert!(store.get(&id, Bucket::Archived).is_some());
        assert_eq!(store.current_id(), None);
    }

    #[test]
    fn buckets_stay_mutually_exclusive() {
        let (mut store, id) = store_with_session();
        store.archive(&id);
        store.archive(&id); // second archive is a no-op
        store.restore(&id);
        store.restore(&id); // second restore is a no-op
        assert!(store.get(&id, Bucket::Active).is_some());
        assert!(store.get(&id, Bucket::Archived).is_none());
    }

    #[test]
    fn archive_then_restore_round_trips_identity() {
        let (mut store, id) = store_with_session();
        store.submit(&id, "hello", &EchoReplier);
        let before = store.get(&id, Bucket::Active).unwrap().clone();

        store.archive(&id);
        store.restore(&id);

        let after = store.get(&id, Bucket::Active).unwrap();
        assert_eq!(*after, before);
    }

    #[test]
    fn restore_does_not_change_selection() {
        let (mut store, id) = store_with_session();
        let other = store.create();
        store.archive(&id);
        store.select(other.clone());
        store.restore(&id);
        assert_eq!(store.current_id(), Some(other.as_str()));
    }

    #[test]
    fn append_message_to_archived_session_is_rejected() {
        let (mut store, id) = store_with_session();
        store.archive(&id);
        store.append_message(&id, Role::User, "hello?");
        assert!(store.get(&id, Bucket::Archived).unwrap().messages.is_empty());
    }

    #[test]
    fn submit_appends_user_then_echo_reply_and_titles() {
        let (mut store, id) = store_with_session();
        store.submit(&id, "hello", &EchoReplier);

        let session = store.get(&id, Bucket::Active).unwrap();
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0], Message::user("hello"));
        assert_eq!(session.messages[1], Message::assistant("Echo: hello"));
        assert_eq!(session.title, "hello");
    }

    #[test]
    fn submit_to_missing_session_is_a_noop() {
        let mut store = SessionStore::new();
        store.submit("ghost", "hello", &EchoReplier);
        assert!(store.is_empty());
    }

    #[test]
    fn title_stays_fixed_after_first_autotitle() {
        let (mut store, id) = store_with_session();
        store.submit(&id, "first message", &EchoReplier);
        store.submit(&id, "second message", &EchoReplier);
        assert_eq!(store.get(&id, Bucket::Active).unwrap().title, "first message");
    }

    #[test]
    fn fifty_char_submission_titles_first_forty() {
        let (mut store, id) = store_with_session();
        let text = "a".repeat(50);
        store.submit(&id, &text, &EchoReplier);
        assert_eq!(store.get(&id, Bucket::Active).unwrap().title, "a".repeat(40));
    }

    #[test]
    fn export_via_store_matches_session_export() {
        let (mut store, id) = store_with_session();
        store.submit(&id, "Hi", &EchoReplier);
        let direct = store.get(&id, Bucket::Active).unwrap().export();
        assert_eq!(store.export(&id, Bucket::Active), Some(direct));
        assert_eq!(store.export(&id, Bucket::Archived), None);
    }

    #[test]
    fn listings_are_newest_first() {
        let mut store = SessionStore::new();
        let a = store.create();
        let b = store.create();
        // Force distinct creation times; create() stamps wall-clock time and
        // both calls can land in the same second.
        if let Some(session) = store.active.get_mut(&a) {
            session.created_at -= chrono::Duration::seconds(10);
        }
        let listed: Vec<&str> = store.active_sessions().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(listed, vec![b.as_str(), a.as_str()]);
    }
}
