//! Read-only view over a generated plan.

use crate::{
    error::{CoachError, Result},
    models::{BodyAnalysis, DailyWorkout, Exercise, ExerciseDetail, WorkoutPlan},
};

/// The dashboard: the plan, the optional analysis and the day being viewed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    plan: WorkoutPlan,
    analysis: Option<BodyAnalysis>,
    active_day: usize,
}

impl DashboardView {
    /// Opens the dashboard on the first day.
    pub fn new(plan: WorkoutPlan, analysis: Option<BodyAnalysis>) -> Self {
        Self {
            plan,
            analysis,
            active_day: 0,
        }
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn analysis(&self) -> Option<&BodyAnalysis> {
        self.analysis.as_ref()
    }

    pub fn active_index(&self) -> usize {
        self.active_day
    }

    /// The day currently shown, if the plan has any days.
    pub fn active_day(&self) -> Option<&DailyWorkout> {
        self.plan.weekly_plan.get(self.active_day)
    }

    /// Switches to the day at `index` (zero based).
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Validation` when `index` is past the last day.
    pub fn select_day(&mut self, index: usize) -> Result<()> {
        if index >= self.plan.weekly_plan.len() {
            return Err(CoachError::validation("day").with_reason(format!(
                "Day {} does not exist; the plan has {} days.",
                index + 1,
                self.plan.weekly_plan.len()
            )));
        }
        self.active_day = index;
        Ok(())
    }

    pub fn exercise(&self, day: usize, index: usize) -> Option<&Exercise> {
        self.plan.weekly_plan.get(day)?.exercises.get(index)
    }

    /// Folds loaded details into every exercise with the given name,
    /// ignoring ASCII case like [`WorkoutPlan::find_exercise`]. Returns how
    /// many exercises were updated.
    pub fn apply_detail(&mut self, name: &str, detail: &ExerciseDetail) -> usize {
        let mut updated = 0;
        for exercise in self
            .plan
            .weekly_plan
            .iter_mut()
            .flat_map(|day| day.exercises.iter_mut())
            .filter(|exercise| exercise.name.eq_ignore_ascii_case(name))
        {
            exercise.apply_detail(detail);
            updated += 1;
        }
        updated
    }
}
