//! Error types for the coach library.

use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderError;

/// Message shown when a plan generation is attempted without connectivity.
pub const OFFLINE_PLAN_MESSAGE: &str =
    "You are offline. Connect to the internet to generate your plan.";

/// Message shown when exercise details are neither cached nor reachable.
pub const OFFLINE_DETAIL_MESSAGE: &str =
    "You are offline and these exercise details are not cached.";

/// Message shown when plan generation fails at the provider.
pub const PROVIDER_PLAN_MESSAGE: &str = "An error occurred during AI analysis. Please try again.";

/// Message shown when an exercise detail lookup fails at the provider.
pub const PROVIDER_DETAIL_MESSAGE: &str =
    "Could not load exercise details. Please try again later.";

/// Message shown when the dashboard is reached without a usable plan.
pub const MISSING_PLAN_MESSAGE: &str = "Workout plan could not be generated. Please start over.";

/// Comprehensive error type for all coach operations.
#[derive(Error, Debug)]
pub enum CoachError {
    /// User input rejected before any operation was issued
    #[error("Invalid input for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// No connectivity at the time a network call would have been made
    #[error("Offline: cannot {operation} without connectivity")]
    Offline { operation: String },
    /// The AI provider failed or returned something unusable
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
    /// A persisted value could not be parsed
    #[error("Corrupt cache entry '{key}': {source}")]
    CacheCorruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The wizard was asked to do something its current step does not allow
    #[error("Cannot {action} while in the {state} step")]
    InvalidTransition { action: String, state: String },
    /// A generation finished after the wizard had moved on; its result was
    /// dropped
    #[error("Result discarded: the wizard was reset while the request was in flight")]
    Superseded,
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Serialization errors when writing to the store
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CoachError {
        CoachError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct ValidationBuilder {
    field: String,
}

impl ValidationBuilder {
    /// Create a new validation error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CoachError {
        CoachError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CoachError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationBuilder {
        ValidationBuilder::new(field)
    }

    /// Creates an offline error for the named operation.
    pub fn offline(operation: impl Into<String>) -> Self {
        Self::Offline {
            operation: operation.into(),
        }
    }

    /// Returns true when the error came from the connectivity guard.
    pub fn is_offline(&self) -> bool {
        matches!(self, Self::Offline { .. })
    }

    /// Creates a configuration error with a message shown to the user as is.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Returns true when the error came from the AI provider.
    pub fn is_provider(&self) -> bool {
        matches!(self, Self::Provider(_))
    }

    /// The text shown to the user for an error raised while generating a
    /// plan. Validation and transition errors keep their own wording.
    pub fn user_message(&self) -> String {
        match self {
            Self::Offline { .. } => OFFLINE_PLAN_MESSAGE.to_string(),
            Self::Provider(_) => PROVIDER_PLAN_MESSAGE.to_string(),
            Self::Validation { reason, .. } => reason.clone(),
            Self::Configuration { message } => message.clone(),
            other => other.to_string(),
        }
    }

    /// The text shown to the user for an error raised while loading
    /// exercise details.
    pub fn detail_message(&self) -> String {
        match self {
            Self::Offline { .. } => OFFLINE_DETAIL_MESSAGE.to_string(),
            Self::Provider(_) => PROVIDER_DETAIL_MESSAGE.to_string(),
            other => other.user_message(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CoachError::database(message).with_source(e))
    }
}

/// Result type alias for coach operations
pub type Result<T> = std::result::Result<T, CoachError>;
