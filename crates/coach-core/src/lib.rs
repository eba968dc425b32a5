//! Core library for the Coach AI workout planner.
//!
//! This crate holds the onboarding wizard, the cache that remembers the last
//! generated plan, the lazy exercise-detail loader and the boundary to the
//! generative AI provider. Front ends supply three collaborators:
//!
//! - a [`KeyValueStore`] ([`SqliteStore`] on disk, [`MemoryStore`] in tests)
//! - an [`AnalysisProvider`] ([`GeminiProvider`] in production)
//! - a [`Connectivity`] signal consulted before every network call
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use coach_core::{
//!     models::{Goal, UserGoals},
//!     CoachBuilder, ConnectivityFlag, GeminiConfig, GeminiProvider, Wizard,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CoachBuilder::new().build_store().await?;
//! let provider = GeminiProvider::new(GeminiConfig::new("api-key"))?;
//! let wizard = Wizard::start_up(store, provider, ConnectivityFlag::online())?;
//!
//! if wizard.dashboard().is_none() {
//!     wizard.start()?;
//!     wizard.submit_goals(UserGoals::new(Goal::MuscleGain, []))?;
//!     wizard.skip_photo().await?;
//! }
//!
//! if let Some(dashboard) = wizard.dashboard() {
//!     println!("{dashboard}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod connectivity;
pub mod dashboard;
pub mod display;
pub mod error;
pub mod exercise_details;
pub mod hydration;
pub mod models;
pub mod provider;
pub mod store;
pub mod wizard;

// Re-export commonly used types
pub use builder::CoachBuilder;
pub use connectivity::{Connectivity, ConnectivityFlag};
pub use dashboard::DashboardView;
pub use display::OperationStatus;
pub use error::{CoachError, Result};
pub use exercise_details::ExerciseDetailLoader;
pub use hydration::Hydration;
pub use models::{
    BodyAnalysis, DailyWorkout, Exercise, ExerciseDetail, Goal, GoalSelection, Photo, UserGoals,
    WorkoutPlan,
};
pub use provider::{AnalysisProvider, GeminiConfig, GeminiProvider, ProviderError};
pub use store::{KeyValueStore, MemoryStore, SqliteStore};
pub use wizard::{Wizard, WizardState, WizardStep};
