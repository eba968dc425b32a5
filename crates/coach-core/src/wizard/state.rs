//! Wizard steps and the data each one carries.

use std::fmt;

use crate::models::{BodyAnalysis, UserGoals, WorkoutPlan};

pub const ANALYZING_PHOTO_MESSAGE: &str = "Analyzing your physique...";
pub const GENERATING_PLAN_MESSAGE: &str = "Generating your personalized workout plan...";

/// Where the user is in the onboarding flow.
///
/// Each variant holds only what is valid at that step, so the dashboard can
/// never be reached without a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    Welcome,
    Goals,
    Photos {
        goals: UserGoals,
    },
    Analyzing {
        goals: UserGoals,
        /// Progress line shown while waiting on the provider
        message: String,
    },
    Dashboard {
        plan: WorkoutPlan,
        analysis: Option<BodyAnalysis>,
    },
}

impl WizardState {
    pub fn step(&self) -> WizardStep {
        match self {
            WizardState::Welcome => WizardStep::Welcome,
            WizardState::Goals => WizardStep::Goals,
            WizardState::Photos { .. } => WizardStep::Photos,
            WizardState::Analyzing { .. } => WizardStep::Analyzing,
            WizardState::Dashboard { .. } => WizardStep::Dashboard,
        }
    }

    /// Goals gathered so far, once the Goals step is complete.
    pub fn goals(&self) -> Option<&UserGoals> {
        match self {
            WizardState::Photos { goals } | WizardState::Analyzing { goals, .. } => Some(goals),
            _ => None,
        }
    }

    pub fn plan(&self) -> Option<&WorkoutPlan> {
        match self {
            WizardState::Dashboard { plan, .. } => Some(plan),
            _ => None,
        }
    }
}

/// Flat tag for a [`WizardState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WizardStep {
    Welcome,
    Goals,
    Photos,
    Analyzing,
    Dashboard,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Welcome => "welcome",
            WizardStep::Goals => "goals",
            WizardStep::Photos => "photos",
            WizardStep::Analyzing => "analyzing",
            WizardStep::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
