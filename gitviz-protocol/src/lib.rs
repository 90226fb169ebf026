//! gitviz-protocol: Shared message definitions for UI surface <-> backend
//! controller communication
//!
//! The protocol is a set of flat, JSON-serializable records tagged with a
//! `command` string discriminant. Requests flow from the sandboxed UI surface
//! to the backend controller; each non-fire-and-forget request is paired with
//! exactly one response of the same command name.

pub mod messages;
pub mod types;

pub use messages::{RequestMessage, ResponseMessage};
pub use types::{CommitInfo, ErrorInfo, GitRepoState, LoadTarget, RepoSet};

/// Current protocol version
pub const PROTOCOL_VERSION: u32 = 1;
