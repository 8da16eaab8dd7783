//! Core IndiBot library (session store, export, reply boundary).

pub mod reply;
pub mod session;
pub mod store;

pub use reply::{EchoReplier, Replier};
pub use session::{DEFAULT_TITLE, Message, Role, Session};
pub use store::{Bucket, SessionStore};
