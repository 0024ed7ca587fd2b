use std::{path::PathBuf, time::Duration};
use thiserror::Error;

/// Conditions that abort an analysis. Everything else (missing tsconfig,
/// unresolved imports, unreadable source files) degrades and is only logged.
#[derive(Error, Debug)]
pub enum Error {
    /// The project root cannot be listed at all
    #[error("Cannot read project root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The alias configuration exists but is not a valid tsconfig document
    #[error("Invalid alias configuration at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// The traversal ran past its deadline
    #[error("Traversal deadline exceeded after {elapsed:?} ({expanded} files expanded)")]
    DeadlineExceeded { elapsed: Duration, expanded: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
