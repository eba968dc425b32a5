//! Prompt text and response schemas sent to the provider.
//!
//! The schemas use the provider's OpenAPI subset (upper-case type names).
//! Field names must match the serde names in [`crate::models`].

use serde_json::{json, Value};

use crate::models::{Goal, UserGoals};

/// Schema for [`crate::models::BodyAnalysis`].
pub fn body_analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysis": {
                "type": "STRING",
                "description": "A detailed but encouraging, fitness-focused analysis of the user's physique based on the image. Do not give medical advice or exact measurements. Describe the general body type, apparent muscle development (e.g. 'well-defined shoulders') and posture. Keep the tone positive and motivating. At most 3 sentences."
            },
            "focusAreas": {
                "type": "ARRAY",
                "description": "A list of 2-3 general fitness areas to focus on for a balanced physique (e.g. 'Core Strength', 'Lower Body Power', 'Posture Improvement').",
                "items": { "type": "STRING" }
            }
        },
        "required": ["analysis", "focusAreas"]
    })
}

/// Schema for [`crate::models::WorkoutPlan`].
pub fn workout_plan_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "planSummary": {
                "type": "STRING",
                "description": "A motivating 2-3 sentence summary of the plan, explaining its focus and the benefits the user can expect."
            },
            "weeklyPlan": {
                "type": "ARRAY",
                "description": "A 7-day weekly plan with 5 training days and 2 rest days.",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": {
                            "type": "STRING",
                            "description": "Day of the week (e.g. 'Monday', 'Tuesday')."
                        },
                        "focus": {
                            "type": "STRING",
                            "description": "Main focus of the day (e.g. 'Upper Body Strength', 'Full Body Conditioning', 'Active Recovery'). Use 'Rest Day' for days without training."
                        },
                        "exercises": {
                            "type": "ARRAY",
                            "description": "Exercises for the day. Must be empty on a Rest Day.",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "name": { "type": "STRING", "description": "Exercise name." },
                                    "sets": { "type": "INTEGER", "description": "Number of sets." },
                                    "reps": {
                                        "type": "STRING",
                                        "description": "Repetitions per set (e.g. '10-12', 'AMRAP 15min')."
                                    },
                                    "rest": {
                                        "type": "INTEGER",
                                        "description": "Rest between sets in seconds."
                                    }
                                },
                                "required": ["name", "sets", "reps", "rest"]
                            }
                        }
                    },
                    "required": ["day", "focus", "exercises"]
                }
            }
        },
        "required": ["planSummary", "weeklyPlan"]
    })
}

pub fn analyze_image_prompt(language: &str) -> String {
    format!(
        "Analyze the physique in this photo from a fitness perspective. \
         Respond in {language} and in JSON format according to the provided schema."
    )
}

pub fn workout_plan_prompt(analysis: &str, goals: &UserGoals, language: &str) -> String {
    let analysis_section = if analysis.is_empty() {
        "**User Context:**\nNo photo analysis was provided. The plan must be based on the user's goals only.".to_string()
    } else {
        format!("**User Fitness Analysis (from photo):**\n{analysis}")
    };

    let primary = goals.primary_goal.map_or("", |goal| goal.as_str());
    let secondary = goals
        .secondary_goals
        .iter()
        .map(Goal::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Create a personalized 5-day weekly workout plan based on the following user information. \
The user has 2 rest days.

{analysis_section}

**User Goals:**
- Primary Goal: {primary}
- Secondary Goals: {secondary}

Generate a structured workout plan in JSON format following the provided schema. \
The plan should be challenging but achievable, and tailored to the user's goals and \
(if available) analysis. The plan and all of its contents must be in {language}."
    )
}

pub fn exercise_guide_prompt(name: &str, language: &str) -> String {
    format!(
        "Give a concise, step-by-step guide on how to perform a \"{name}\". \
         Include tips for correct form and common mistakes to avoid. \
         Use markdown for formatting. Respond in {language}."
    )
}

pub fn exercise_illustration_prompt(name: &str) -> String {
    format!(
        "Fitness exercise illustration of a person doing \"{name}\". \
         Clear anatomical diagram style showing correct form. \
         White background, simple lines, gender-neutral figure."
    )
}
