//! Fitness goals and the selection made during the Goals step.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CoachError, Result};

/// Upper bound on secondary goals a user may pick.
pub const MAX_SECONDARY_GOALS: usize = 2;

/// Type-safe enumeration of fitness objectives.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Goal {
    #[serde(rename = "Fat Loss")]
    FatLoss,
    #[serde(rename = "Muscle Gain")]
    MuscleGain,
    #[serde(rename = "Improve Endurance")]
    ImproveEndurance,
    #[serde(rename = "Increase Flexibility")]
    IncreaseFlexibility,
    #[serde(rename = "General Fitness")]
    GeneralFitness,
}

impl Goal {
    /// All goals in presentation order.
    pub const ALL: [Goal; 5] = [
        Goal::FatLoss,
        Goal::MuscleGain,
        Goal::ImproveEndurance,
        Goal::IncreaseFlexibility,
        Goal::GeneralFitness,
    ];

    /// Wire representation, as sent to the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::FatLoss => "Fat Loss",
            Goal::MuscleGain => "Muscle Gain",
            Goal::ImproveEndurance => "Improve Endurance",
            Goal::IncreaseFlexibility => "Increase Flexibility",
            Goal::GeneralFitness => "General Fitness",
        }
    }

    /// Kebab-case slug used on the command line.
    pub fn slug(&self) -> &'static str {
        match self {
            Goal::FatLoss => "fat-loss",
            Goal::MuscleGain => "muscle-gain",
            Goal::ImproveEndurance => "improve-endurance",
            Goal::IncreaseFlexibility => "increase-flexibility",
            Goal::GeneralFitness => "general-fitness",
        }
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        Goal::ALL
            .into_iter()
            .find(|goal| goal.slug() == normalized)
            .ok_or_else(|| format!("Invalid goal: {s}"))
    }
}

/// Goals submitted at the end of the Goals step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserGoals {
    pub primary_goal: Option<Goal>,
    #[serde(default)]
    pub secondary_goals: Vec<Goal>,
}

impl UserGoals {
    /// Goals with a primary and the given secondaries.
    pub fn new(primary: Goal, secondary: impl IntoIterator<Item = Goal>) -> Self {
        Self {
            primary_goal: Some(primary),
            secondary_goals: secondary.into_iter().collect(),
        }
    }

    /// Checks the rules the Goals step enforces before advancing.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Validation` when the primary goal is missing, more
    /// than [`MAX_SECONDARY_GOALS`] secondaries are given, a secondary repeats
    /// or a secondary duplicates the primary.
    pub fn validate(&self) -> Result<()> {
        let Some(primary) = self.primary_goal else {
            return Err(CoachError::validation("primaryGoal")
                .with_reason("Select a primary goal before continuing."));
        };

        if self.secondary_goals.len() > MAX_SECONDARY_GOALS {
            return Err(CoachError::validation("secondaryGoals").with_reason(format!(
                "Select at most {MAX_SECONDARY_GOALS} secondary goals."
            )));
        }

        if self.secondary_goals.contains(&primary) {
            return Err(CoachError::validation("secondaryGoals").with_reason(format!(
                "{} is already the primary goal.",
                primary.as_str()
            )));
        }

        for (index, goal) in self.secondary_goals.iter().enumerate() {
            if self.secondary_goals[..index].contains(goal) {
                return Err(CoachError::validation("secondaryGoals")
                    .with_reason(format!("{} was selected twice.", goal.as_str())));
            }
        }

        Ok(())
    }
}

/// In-progress goal selection for the Goals step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoalSelection {
    primary: Option<Goal>,
    secondary: Vec<Goal>,
}

impl GoalSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn primary(&self) -> Option<Goal> {
        self.primary
    }

    pub fn secondary(&self) -> &[Goal] {
        &self.secondary
    }

    /// Sets the primary goal, dropping it from the secondary selection.
    pub fn select_primary(&mut self, goal: Goal) {
        self.primary = Some(goal);
        self.secondary.retain(|g| *g != goal);
    }

    /// Adds or removes a secondary goal. Returns whether the goal is now
    /// selected. Adding is refused for the primary goal and once the
    /// secondary selection is full.
    pub fn toggle_secondary(&mut self, goal: Goal) -> bool {
        if let Some(position) = self.secondary.iter().position(|g| *g == goal) {
            self.secondary.remove(position);
            return false;
        }
        if self.primary == Some(goal) || self.secondary.len() >= MAX_SECONDARY_GOALS {
            return false;
        }
        self.secondary.push(goal);
        true
    }

    /// Goals that may be offered as secondaries.
    pub fn available_secondaries(&self) -> Vec<Goal> {
        Goal::ALL
            .into_iter()
            .filter(|goal| Some(*goal) != self.primary)
            .collect()
    }

    /// Whether `goal` can currently be toggled on as a secondary.
    pub fn can_add_secondary(&self, goal: Goal) -> bool {
        self.primary != Some(goal)
            && !self.secondary.contains(&goal)
            && self.secondary.len() < MAX_SECONDARY_GOALS
    }

    /// Finalizes the selection.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::Validation` if no primary goal has been chosen.
    pub fn finish(&self) -> Result<UserGoals> {
        let goals = UserGoals {
            primary_goal: self.primary,
            secondary_goals: self.secondary.clone(),
        };
        goals.validate()?;
        Ok(goals)
    }
}
