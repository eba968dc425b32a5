//! Display implementations for domain models.

use std::fmt;

use crate::models::{BodyAnalysis, DailyWorkout, Exercise, ExerciseDetail, Goal, WorkoutPlan};

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for BodyAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## AI Fitness Analysis")?;
        writeln!(f)?;
        writeln!(f, "{}", self.analysis)?;
        if !self.focus_areas.is_empty() {
            writeln!(f)?;
            writeln!(f, "**Focus Areas:** {}", self.focus_areas.join(", "))?;
        }
        Ok(())
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "**{}**: {} sets × {} reps, {}s rest",
            self.name, self.sets, self.reps, self.rest
        )
    }
}

impl fmt::Display for DailyWorkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}: {}", self.day, self.focus)?;
        writeln!(f)?;
        if self.is_rest_day() {
            writeln!(f, "Rest day. Recover and come back stronger.")?;
        } else {
            for (index, exercise) in self.exercises.iter().enumerate() {
                writeln!(f, "{}. {exercise}", index + 1)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for WorkoutPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Your Weekly Plan")?;
        writeln!(f)?;
        writeln!(f, "{}", self.plan_summary)?;
        for day in &self.weekly_plan {
            writeln!(f)?;
            write!(f, "{day}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ExerciseDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.description.trim_end())?;
        writeln!(f)?;
        match self.image_parts() {
            Some((mime, payload)) => writeln!(
                f,
                "_Illustration: {mime}, {} bytes encoded_",
                payload.len()
            ),
            None => writeln!(f, "_Illustration unavailable_"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push_up() -> Exercise {
        Exercise {
            name: "Push-up".to_string(),
            sets: 3,
            reps: "10-12".to_string(),
            rest: 60,
            description: None,
            image: None,
        }
    }

    #[test]
    fn test_exercise_line() {
        assert_eq!(
            push_up().to_string(),
            "**Push-up**: 3 sets × 10-12 reps, 60s rest"
        );
    }

    #[test]
    fn test_rest_day_display() {
        let day = DailyWorkout {
            day: "Sunday".to_string(),
            focus: "Rest Day".to_string(),
            exercises: vec![],
        };
        let output = day.to_string();
        assert!(output.starts_with("## Sunday: Rest Day"));
        assert!(output.contains("Rest day."));
    }

    #[test]
    fn test_training_day_numbers_exercises() {
        let day = DailyWorkout {
            day: "Monday".to_string(),
            focus: "Upper Body".to_string(),
            exercises: vec![push_up(), push_up()],
        };
        let output = day.to_string();
        assert!(output.contains("1. **Push-up**"));
        assert!(output.contains("2. **Push-up**"));
    }

    #[test]
    fn test_analysis_focus_areas() {
        let analysis = BodyAnalysis {
            analysis: "Strong legs.".to_string(),
            focus_areas: vec!["Core Strength".to_string(), "Posture".to_string()],
        };
        assert!(analysis
            .to_string()
            .contains("**Focus Areas:** Core Strength, Posture"));
    }

    #[test]
    fn test_exercise_detail_summarizes_image() {
        let detail = ExerciseDetail {
            description: "1. Brace.\n".to_string(),
            image: "data:image/png;base64,AAAA".to_string(),
        };
        let output = detail.to_string();
        assert!(output.starts_with("1. Brace.\n"));
        assert!(output.contains("_Illustration: image/png, 4 bytes encoded_"));
    }
}
