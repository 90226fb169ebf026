//! Error types for gitviz
//!
//! Provides a unified error type used across all gitviz crates.

use std::path::PathBuf;

/// Main error type for gitviz operations
#[derive(Debug, thiserror::Error)]
pub enum GitvizError {
    // === IO Errors ===

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    // === Repository Errors ===

    /// A repository operation rejected; displays the tool's message verbatim
    /// because it is surfaced to the user inline.
    #[error("{0}")]
    Git(String),

    #[error("Not a repository: {0}")]
    NotARepository(PathBuf),

    // === Watcher Errors ===

    #[error("Watch error: {0}")]
    Watch(String),

    // === UI Surface Errors ===

    #[error("Failed to deliver message to UI surface: {0}")]
    Transport(String),

    #[error("Host window error: {0}")]
    Host(String),

    // === State Errors ===

    #[error("State persistence error: {0}")]
    State(String),

    // === Configuration Errors ===

    #[error("Configuration error: {0}")]
    Config(String),

    // === Internal Errors ===

    #[error("Internal error: {0}")]
    Internal(String),
}

impl GitvizError {
    /// Create a repository operation error
    pub fn git(msg: impl Into<String>) -> Self {
        Self::Git(msg.into())
    }

    /// Create a watch error
    pub fn watch(msg: impl Into<String>) -> Self {
        Self::Watch(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a host window error
    pub fn host(msg: impl Into<String>) -> Self {
        Self::Host(msg.into())
    }

    /// Create a state persistence error
    pub fn state(msg: impl Into<String>) -> Self {
        Self::State(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Transport errors are tolerated: the UI surface may be disposed before
    /// a pending response is ready, in which case the send is a no-op.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Result type alias using GitvizError
pub type Result<T> = std::result::Result<T, GitvizError>;
