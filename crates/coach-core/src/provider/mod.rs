//! The AI analysis provider boundary.
//!
//! Everything the wizard and the dashboard need from the generative service
//! goes through [`AnalysisProvider`]. The shipped implementation is
//! [`GeminiProvider`]; tests plug in fakes.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{BodyAnalysis, ExerciseDetail, Photo, UserGoals, WorkoutPlan};

pub mod api;
pub mod gemini;
pub mod prompts;

pub use gemini::{GeminiConfig, GeminiProvider};

#[derive(Error, Debug)]
pub enum ProviderError {
    /// The request could not be sent or the response body not read.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status code.
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The response was well-formed but missing something we need (no
    /// candidates, no image bytes).
    #[error("Invariant: {0}")]
    Invariant(String),
    /// The generated text did not match the requested JSON schema.
    #[error("Malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type ProviderResult<T> = Result<T, ProviderError>;

/// Generative service used to analyze photos, build plans and describe
/// exercises. All calls may take seconds.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Describes the physique in a photo.
    async fn analyze_image(&self, photo: &Photo) -> ProviderResult<BodyAnalysis>;

    /// Builds a weekly plan. An empty `analysis` means no photo was given
    /// and the plan must rely on `goals` alone.
    async fn generate_plan(&self, analysis: &str, goals: &UserGoals)
        -> ProviderResult<WorkoutPlan>;

    /// Fetches a how-to guide and an illustration for an exercise. Fails as
    /// a whole if either part fails.
    async fn exercise_detail(&self, name: &str) -> ProviderResult<ExerciseDetail>;
}

#[async_trait]
impl<P: AnalysisProvider + ?Sized> AnalysisProvider for Arc<P> {
    async fn analyze_image(&self, photo: &Photo) -> ProviderResult<BodyAnalysis> {
        (**self).analyze_image(photo).await
    }

    async fn generate_plan(
        &self,
        analysis: &str,
        goals: &UserGoals,
    ) -> ProviderResult<WorkoutPlan> {
        (**self).generate_plan(analysis, goals).await
    }

    async fn exercise_detail(&self, name: &str) -> ProviderResult<ExerciseDetail> {
        (**self).exercise_detail(name).await
    }
}
