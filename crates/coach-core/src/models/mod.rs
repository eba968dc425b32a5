//! Data models for goals, analyses and workout plans.
//!
//! These types mirror the JSON exchanged with the AI provider and persisted in
//! the cache, so their serde names are part of the wire contract:
//!
//! ```json
//! {
//!   "planSummary": "...",
//!   "weeklyPlan": [
//!     { "day": "Monday", "focus": "Upper Body",
//!       "exercises": [{ "name": "Push-up", "sets": 3, "reps": "10-12", "rest": 60 }] }
//!   ]
//! }
//! ```
//!
//! Display implementations live in [`crate::display`].

pub mod goal;
pub mod photo;
pub mod plan;

#[cfg(test)]
mod tests;

pub use goal::{Goal, GoalSelection, UserGoals, MAX_SECONDARY_GOALS};
pub use photo::Photo;
pub use plan::{BodyAnalysis, DailyWorkout, Exercise, ExerciseDetail, WorkoutPlan};
