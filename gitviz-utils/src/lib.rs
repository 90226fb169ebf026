//! gitviz-utils: Common utilities for gitviz
//!
//! Error types and logging bootstrap shared by all gitviz crates.

pub mod error;
pub mod logging;

pub use error::{GitvizError, Result};
pub use logging::{init_logging, init_logging_with_config, LogConfig, LogOutput};
