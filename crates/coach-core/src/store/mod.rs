//! Persisted key-value cache for plans, analyses and exercise details.
//!
//! The wizard and the exercise-detail loader never reach for a global store;
//! they are handed a [`KeyValueStore`] so that the same logic runs against
//! the on-disk [`SqliteStore`] or the in-memory [`MemoryStore`].
//!
//! Values are JSON text with fixed keys and no versioning:
//!
//! | key                        | value                 |
//! |----------------------------|-----------------------|
//! | `workoutPlan`              | [`WorkoutPlan`]       |
//! | `bodyAnalysis`             | [`BodyAnalysis`]      |
//! | `exercise-details-<name>`  | [`ExerciseDetail`]    |
//!
//! [`WorkoutPlan`]: crate::models::WorkoutPlan
//! [`BodyAnalysis`]: crate::models::BodyAnalysis
//! [`ExerciseDetail`]: crate::models::ExerciseDetail

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CoachError, Result};

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Key holding the last generated workout plan.
pub const WORKOUT_PLAN_KEY: &str = "workoutPlan";

/// Key holding the last body analysis.
pub const BODY_ANALYSIS_KEY: &str = "bodyAnalysis";

/// Prefix for per-exercise detail entries.
pub const EXERCISE_DETAIL_PREFIX: &str = "exercise-details-";

/// Cache key for the details of the named exercise.
pub fn exercise_detail_key(name: &str) -> String {
    format!("{EXERCISE_DETAIL_PREFIX}{name}")
}

/// One change in a batch passed to [`KeyValueStore::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite {
    Set { key: String, value: String },
    Delete { key: String },
}

impl StoreWrite {
    pub fn set(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Set {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<String>) -> Self {
        Self::Delete { key: key.into() }
    }

    /// Serializes `value` as JSON into a `Set`.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Serialization` if `value` cannot be serialized.
    pub fn json<T: Serialize>(key: impl Into<String>, value: &T) -> Result<Self> {
        Ok(Self::set(key, serde_json::to_string(value)?))
    }
}

/// Synchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn delete(&self, key: &str) -> Result<()>;

    /// Lists keys starting with `prefix`.
    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>>;

    /// Applies `writes` in order. Stores that can do so apply the whole batch
    /// or nothing; the default applies them one at a time.
    fn apply(&self, writes: &[StoreWrite]) -> Result<()> {
        for write in writes {
            match write {
                StoreWrite::Set { key, value } => self.set(key, value)?,
                StoreWrite::Delete { key } => self.delete(key)?,
            }
        }
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key)
    }

    fn keys_with_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }

    fn apply(&self, writes: &[StoreWrite]) -> Result<()> {
        (**self).apply(writes)
    }
}

/// Reads and parses a JSON value.
///
/// # Errors
///
/// Returns `CoachError::CacheCorruption` when the stored text does not parse
/// as `T`, and propagates store errors.
pub fn read_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| CoachError::CacheCorruption {
                key: key.to_string(),
                source,
            }),
        None => Ok(None),
    }
}

/// Serializes and stores a JSON value.
///
/// # Errors
///
/// Returns `CoachError::Serialization` if `value` cannot be serialized and
/// propagates store errors.
pub fn write_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BodyAnalysis;

    #[test]
    fn test_exercise_detail_key() {
        assert_eq!(exercise_detail_key("Push-up"), "exercise-details-Push-up");
    }

    #[test]
    fn test_json_helpers_round_trip_and_corruption() {
        let store = MemoryStore::new();
        let analysis = BodyAnalysis {
            analysis: "Balanced build.".to_string(),
            focus_areas: vec!["Core Strength".to_string()],
        };

        write_json(&store, BODY_ANALYSIS_KEY, &analysis).unwrap();
        let raw = store.get(BODY_ANALYSIS_KEY).unwrap().unwrap();
        assert!(raw.contains("\"focusAreas\""));

        let read: Option<BodyAnalysis> = read_json(&store, BODY_ANALYSIS_KEY).unwrap();
        assert_eq!(read, Some(analysis));

        store.set(BODY_ANALYSIS_KEY, "{not json").unwrap();
        let err = read_json::<BodyAnalysis>(&store, BODY_ANALYSIS_KEY).unwrap_err();
        assert!(matches!(err, CoachError::CacheCorruption { ref key, .. } if key == BODY_ANALYSIS_KEY));

        let missing: Option<BodyAnalysis> = read_json(&store, "absent").unwrap();
        assert!(missing.is_none());
    }
}
