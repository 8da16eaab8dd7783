//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer itself never touches the filesystem.

use indibot_core::Bucket;

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, PartialEq, Eq)]
pub enum UiEffect {
    /// Write the transcript of a session to a text file.
    Export { id: String, bucket: Bucket },
}
