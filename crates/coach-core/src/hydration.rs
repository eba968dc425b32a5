//! Restoring and persisting the last generated plan.
//!
//! On start-up the wizard reads `workoutPlan` and `bodyAnalysis`. A readable
//! plan restores the dashboard; anything unreadable is treated as corrupt,
//! both keys are removed and the session starts fresh.

use log::{debug, warn};

use crate::{
    error::{CoachError, Result},
    models::{BodyAnalysis, WorkoutPlan},
    store::{read_json, KeyValueStore, StoreWrite, BODY_ANALYSIS_KEY, WORKOUT_PLAN_KEY},
};

/// Outcome of reading the cache at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// Nothing usable was cached.
    Fresh,
    /// A previously generated plan, with its analysis when one was made.
    Restored {
        plan: WorkoutPlan,
        analysis: Option<BodyAnalysis>,
    },
}

/// Reads the cached plan and analysis.
///
/// A missing plan yields [`Hydration::Fresh`] and leaves the store alone. A
/// plan or analysis that fails to parse clears both keys and also yields
/// [`Hydration::Fresh`].
///
/// # Errors
///
/// Only store failures are returned; corruption is healed, not reported.
pub fn hydrate(store: &dyn KeyValueStore) -> Result<Hydration> {
    match read_cached(store) {
        Ok(Some((plan, analysis))) => {
            debug!(
                "Restored cached plan ({} days, analysis: {})",
                plan.weekly_plan.len(),
                analysis.is_some()
            );
            Ok(Hydration::Restored { plan, analysis })
        }
        Ok(None) => Ok(Hydration::Fresh),
        Err(CoachError::CacheCorruption { key, source }) => {
            warn!("Discarding corrupt cache entry '{key}': {source}");
            clear(store)?;
            Ok(Hydration::Fresh)
        }
        Err(e) => Err(e),
    }
}

fn read_cached(store: &dyn KeyValueStore) -> Result<Option<(WorkoutPlan, Option<BodyAnalysis>)>> {
    let Some(plan) = read_json::<WorkoutPlan>(store, WORKOUT_PLAN_KEY)? else {
        return Ok(None);
    };
    let analysis = read_json::<BodyAnalysis>(store, BODY_ANALYSIS_KEY)?;
    Ok(Some((plan, analysis)))
}

/// Writes a freshly generated result as one batch. An absent analysis
/// removes any previously cached one so the two keys always describe the
/// same run.
///
/// The plan is written last, so a store without atomic batches never holds
/// a new analysis next to a missing plan; hydration ignores such an orphan.
///
/// # Errors
///
/// Propagates serialization and store failures.
pub fn persist_result(
    store: &dyn KeyValueStore,
    plan: &WorkoutPlan,
    analysis: Option<&BodyAnalysis>,
) -> Result<()> {
    let analysis_write = match analysis {
        Some(analysis) => StoreWrite::json(BODY_ANALYSIS_KEY, analysis)?,
        None => StoreWrite::delete(BODY_ANALYSIS_KEY),
    };
    store.apply(&[analysis_write, StoreWrite::json(WORKOUT_PLAN_KEY, plan)?])
}

/// Removes the cached plan and analysis.
///
/// # Errors
///
/// Propagates store failures.
pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
    store.apply(&[
        StoreWrite::delete(WORKOUT_PLAN_KEY),
        StoreWrite::delete(BODY_ANALYSIS_KEY),
    ])
}
