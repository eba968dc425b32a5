//! Lazy, cached lookup of exercise guides and illustrations.
//!
//! A cached entry is served without any network access and never expires.
//! Concurrent lookups for the same uncached name are not coalesced; each
//! caller goes to the provider and the last write wins.

use log::{debug, info, warn};

use crate::{
    connectivity::Connectivity,
    error::{CoachError, Result},
    models::ExerciseDetail,
    provider::AnalysisProvider,
    store::{exercise_detail_key, read_json, write_json, KeyValueStore, EXERCISE_DETAIL_PREFIX},
};

/// Loads [`ExerciseDetail`]s through the cache.
pub struct ExerciseDetailLoader<S, P, C> {
    store: S,
    provider: P,
    connectivity: C,
}

impl<S, P, C> ExerciseDetailLoader<S, P, C>
where
    S: KeyValueStore,
    P: AnalysisProvider,
    C: Connectivity,
{
    pub fn new(store: S, provider: P, connectivity: C) -> Self {
        Self {
            store,
            provider,
            connectivity,
        }
    }

    /// Returns the details for `name`, from the cache when possible.
    ///
    /// # Errors
    ///
    /// - `CoachError::Offline` when the entry is not cached and there is no
    ///   connectivity; the provider is not called
    /// - `CoachError::Provider` when the lookup fails; nothing is cached
    pub async fn load(&self, name: &str) -> Result<ExerciseDetail> {
        if let Some(detail) = self.cached(name)? {
            debug!("Exercise details for '{name}' served from cache");
            return Ok(detail);
        }

        if !self.connectivity.is_online() {
            return Err(CoachError::offline(format!(
                "load details for '{name}' (not cached)"
            )));
        }

        let detail = self.provider.exercise_detail(name).await?;
        write_json(&self.store, &exercise_detail_key(name), &detail)?;
        info!("Cached exercise details for '{name}'");
        Ok(detail)
    }

    /// Cached details for `name`, if any. A corrupt entry is removed and
    /// reported as absent.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn cached(&self, name: &str) -> Result<Option<ExerciseDetail>> {
        let key = exercise_detail_key(name);
        match read_json::<ExerciseDetail>(&self.store, &key) {
            Err(CoachError::CacheCorruption { source, .. }) => {
                warn!("Discarding corrupt cache entry '{key}': {source}");
                self.store.delete(&key)?;
                Ok(None)
            }
            other => other,
        }
    }

    /// Names of all exercises with cached details.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn cached_names(&self) -> Result<Vec<String>> {
        Ok(self
            .store
            .keys_with_prefix(EXERCISE_DETAIL_PREFIX)?
            .into_iter()
            .filter_map(|key| key.strip_prefix(EXERCISE_DETAIL_PREFIX).map(String::from))
            .collect())
    }

    /// Drops the cached details for `name`.
    ///
    /// # Errors
    ///
    /// Propagates store failures.
    pub fn forget(&self, name: &str) -> Result<()> {
        self.store.delete(&exercise_detail_key(name))
    }
}
