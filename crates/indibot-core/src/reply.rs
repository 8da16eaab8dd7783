//! Reply generation boundary.
//!
//! The store is agnostic about how replies are produced. A [`Replier`] is
//! invoked synchronously after the user message is appended, with the full
//! history; there is no streaming or partial-append contract. The shipped
//! implementation is the echo stub.

use crate::session::Message;

/// Produces assistant reply text for a submitted user message.
pub trait Replier {
    /// Generates the reply for `latest_user_text`.
    ///
    /// `history` is the full message sequence of the session, including the
    /// just-appended user message.
    fn generate_reply(&self, latest_user_text: &str, history: &[Message]) -> String;
}

/// Stub replier that echoes the user's text back with a fixed label.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoReplier;

impl Replier for EchoReplier {
    fn generate_reply(&self, latest_user_text: &str, _history: &[Message]) -> String {
        format!("Echo: {latest_user_text}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_replier_prefixes_latest_text() {
        let reply = EchoReplier.generate_reply("hello", &[Message::user("hello")]);
        assert_eq!(reply, "Echo: hello");
    }
}
