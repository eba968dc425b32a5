//! One-line outcome messages printed after a command.

use std::{fmt, path::PathBuf};

/// Outcome of a command that has no richer view to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationStatus {
    Success(String),
    Failure(String),
    /// An exercise illustration was written to disk.
    IllustrationSaved(PathBuf),
}

impl OperationStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self::Success(message.into())
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure(message.into())
    }

    pub fn illustration_saved(path: impl Into<PathBuf>) -> Self {
        Self::IllustrationSaved(path.into())
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(message) => writeln!(f, "Success: {message}"),
            Self::Failure(message) => writeln!(f, "Error: {message}"),
            Self::IllustrationSaved(path) => {
                writeln!(f, "Success: Saved illustration to `{}`", path.display())
            }
        }
    }
}
