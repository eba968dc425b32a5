//! Analysis and workout plan models.

use serde::{Deserialize, Serialize};

/// Physique summary derived from a photo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BodyAnalysis {
    pub analysis: String,
    pub focus_areas: Vec<String>,
}

/// A single exercise within a day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub name: String,

    pub sets: u32,

    /// Repetitions per set; may be a range or a scheme such as "AMRAP 15min"
    pub reps: String,

    /// Rest between sets, in seconds
    pub rest: u32,

    /// Step-by-step guide, filled in lazily from exercise details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Illustration as a data URI, filled in lazily from exercise details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Exercise {
    /// Copies a loaded detail lookup onto this exercise.
    pub fn apply_detail(&mut self, detail: &ExerciseDetail) {
        self.description = Some(detail.description.clone());
        self.image = Some(detail.image.clone());
    }
}

/// One day of the weekly schedule. No exercises means a rest day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyWorkout {
    pub day: String,
    pub focus: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl DailyWorkout {
    pub fn is_rest_day(&self) -> bool {
        self.exercises.is_empty()
    }
}

/// The full weekly schedule returned by the provider.
///
/// The provider is asked for seven days with two rest days; that shape is
/// not re-checked here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutPlan {
    pub plan_summary: String,
    pub weekly_plan: Vec<DailyWorkout>,
}

impl WorkoutPlan {
    /// Number of days with no exercises.
    pub fn rest_days(&self) -> usize {
        self.weekly_plan.iter().filter(|day| day.is_rest_day()).count()
    }

    /// Whether the dashboard can show this plan (it needs a day to open on).
    pub fn is_renderable(&self) -> bool {
        !self.weekly_plan.is_empty()
    }

    /// Finds an exercise by name anywhere in the week.
    pub fn find_exercise(&self, name: &str) -> Option<&Exercise> {
        self.weekly_plan
            .iter()
            .flat_map(|day| day.exercises.iter())
            .find(|exercise| exercise.name.eq_ignore_ascii_case(name))
    }
}

/// Description and illustration for a named exercise.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDetail {
    /// Markdown guide
    pub description: String,
    /// `data:<mime>;base64,<bytes>`
    pub image: String,
}

impl ExerciseDetail {
    /// MIME type and base64 payload of the illustration, if it is a data URI.
    pub fn image_parts(&self) -> Option<(&str, &str)> {
        let rest = self.image.strip_prefix("data:")?;
        let (mime, payload) = rest.split_once(";base64,")?;
        Some((mime, payload))
    }
}
