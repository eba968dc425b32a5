//! Display for the wizard steps and the dashboard.

use std::fmt;

use crate::{
    dashboard::DashboardView,
    models::{Goal, MAX_SECONDARY_GOALS},
    wizard::WizardState,
};

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Welcome => {
                writeln!(f, "# AI Personal Trainer")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "Get a personalized fitness plan based on your unique physique and goals."
                )?;
                writeln!(f)?;
                writeln!(
                    f,
                    "Run `coach plan --primary <goal>` to get started, or `coach goals` to see the options."
                )
            }
            WizardState::Goals => {
                writeln!(f, "# What are your goals?")?;
                writeln!(f)?;
                writeln!(
                    f,
                    "Pick one primary goal and up to {MAX_SECONDARY_GOALS} secondary goals:"
                )?;
                writeln!(f)?;
                for goal in Goal::ALL {
                    writeln!(f, "- {goal} (`{}`)", goal.slug())?;
                }
                Ok(())
            }
            WizardState::Photos { goals } => {
                writeln!(f, "# Upload a photo")?;
                writeln!(f)?;
                if let Some(primary) = goals.primary_goal {
                    writeln!(f, "- Primary goal: {primary}")?;
                }
                if !goals.secondary_goals.is_empty() {
                    let secondary = goals
                        .secondary_goals
                        .iter()
                        .map(Goal::as_str)
                        .collect::<Vec<_>>()
                        .join(", ");
                    writeln!(f, "- Secondary goals: {secondary}")?;
                }
                writeln!(f)?;
                writeln!(
                    f,
                    "Add a photo for a body analysis, or skip it to get a general plan."
                )
            }
            WizardState::Analyzing { message, .. } => {
                writeln!(f, "# {message}")?;
                writeln!(f)?;
                writeln!(f, "This may take a moment.")
            }
            WizardState::Dashboard { plan, analysis } => {
                write!(f, "{}", DashboardView::new(plan.clone(), analysis.clone()))
            }
        }
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan();
        writeln!(f, "# Your Weekly Plan")?;
        writeln!(f)?;
        writeln!(f, "{}", plan.plan_summary)?;
        writeln!(f)?;

        if let Some(analysis) = self.analysis() {
            write!(f, "{analysis}")?;
            writeln!(f)?;
        }

        writeln!(f, "## Week Overview")?;
        writeln!(f)?;
        for (index, day) in plan.weekly_plan.iter().enumerate() {
            let marker = if index == self.active_index() { "➤ " } else { "" };
            writeln!(f, "{}. {marker}**{}**: {}", index + 1, day.day, day.focus)?;
        }

        if let Some(day) = self.active_day() {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        Ok(())
    }
}

/// Newtype for listing exercise names with cached details.
pub struct CachedExercises<'a>(pub &'a [String]);

impl fmt::Display for CachedExercises<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No exercise details cached.");
        }
        writeln!(f, "# Cached Exercise Details")?;
        writeln!(f)?;
        for name in self.0 {
            writeln!(f, "- {name}")?;
        }
        Ok(())
    }
}
