#[cfg(test)]
mod model_tests {
    use serde_json::json;

    use crate::models::{
        DailyWorkout, Exercise, ExerciseDetail, Goal, GoalSelection, UserGoals, WorkoutPlan,
    };

    fn create_test_plan() -> WorkoutPlan {
        serde_json::from_value(json!({
            "planSummary": "A balanced week.",
            "weeklyPlan": [
                { "day": "Monday", "focus": "Upper Body", "exercises": [
                    { "name": "Push-up", "sets": 3, "reps": "10-12", "rest": 60 },
                    { "name": "Bent-over Row", "sets": 4, "reps": "8", "rest": 90 }
                ]},
                { "day": "Tuesday", "focus": "Rest Day", "exercises": [] },
                { "day": "Wednesday", "focus": "Conditioning", "exercises": [
                    { "name": "Burpee", "sets": 1, "reps": "AMRAP 15min", "rest": 0 }
                ]}
            ]
        }))
        .expect("Failed to parse plan")
    }

    #[test]
    fn test_goal_wire_names() {
        assert_eq!(
            serde_json::to_value(Goal::MuscleGain).unwrap(),
            json!("Muscle Gain")
        );
        let goal: Goal = serde_json::from_value(json!("Increase Flexibility")).unwrap();
        assert_eq!(goal, Goal::IncreaseFlexibility);
    }

    #[test]
    fn test_goal_from_str_accepts_slugs_and_names() {
        assert_eq!("muscle-gain".parse::<Goal>().unwrap(), Goal::MuscleGain);
        assert_eq!("FAT_LOSS".parse::<Goal>().unwrap(), Goal::FatLoss);
        assert_eq!("General Fitness".parse::<Goal>().unwrap(), Goal::GeneralFitness);
        assert!("strength".parse::<Goal>().is_err());
    }

    #[test]
    fn test_user_goals_wire_shape() {
        let goals = UserGoals::new(Goal::FatLoss, [Goal::ImproveEndurance]);
        assert_eq!(
            serde_json::to_value(&goals).unwrap(),
            json!({ "primaryGoal": "Fat Loss", "secondaryGoals": ["Improve Endurance"] })
        );
    }

    #[test]
    fn test_user_goals_validation() {
        assert!(UserGoals::new(Goal::MuscleGain, []).validate().is_ok());
        assert!(UserGoals::new(Goal::MuscleGain, [Goal::FatLoss, Goal::GeneralFitness])
            .validate()
            .is_ok());

        assert!(UserGoals::default().validate().is_err());
        assert!(UserGoals::new(Goal::MuscleGain, [Goal::MuscleGain])
            .validate()
            .is_err());
        assert!(UserGoals::new(Goal::MuscleGain, [Goal::FatLoss, Goal::FatLoss])
            .validate()
            .is_err());
        assert!(UserGoals::new(
            Goal::MuscleGain,
            [Goal::FatLoss, Goal::GeneralFitness, Goal::ImproveEndurance]
        )
        .validate()
        .is_err());
    }

    #[test]
    fn test_select_primary_removes_from_secondary() {
        let mut selection = GoalSelection::new();
        selection.select_primary(Goal::FatLoss);
        assert!(selection.toggle_secondary(Goal::MuscleGain));
        assert!(selection.toggle_secondary(Goal::GeneralFitness));

        selection.select_primary(Goal::MuscleGain);
        assert_eq!(selection.primary(), Some(Goal::MuscleGain));
        assert_eq!(selection.secondary(), &[Goal::GeneralFitness]);

        // Selecting the same primary again changes nothing
        selection.select_primary(Goal::MuscleGain);
        assert_eq!(selection.secondary(), &[Goal::GeneralFitness]);
    }

    #[test]
    fn test_toggle_secondary_limits() {
        let mut selection = GoalSelection::new();
        selection.select_primary(Goal::FatLoss);

        assert!(!selection.toggle_secondary(Goal::FatLoss));
        assert!(selection.toggle_secondary(Goal::MuscleGain));
        assert!(selection.toggle_secondary(Goal::ImproveEndurance));
        assert!(!selection.can_add_secondary(Goal::GeneralFitness));
        assert!(!selection.toggle_secondary(Goal::GeneralFitness));
        assert_eq!(selection.secondary().len(), 2);

        // Toggling an already selected goal removes it
        assert!(!selection.toggle_secondary(Goal::MuscleGain));
        assert_eq!(selection.secondary(), &[Goal::ImproveEndurance]);
        assert!(!selection.available_secondaries().contains(&Goal::FatLoss));
        assert_eq!(selection.available_secondaries().len(), 4);
    }

    #[test]
    fn test_finish_requires_primary() {
        let mut selection = GoalSelection::new();
        assert!(selection.finish().is_err());

        selection.select_primary(Goal::GeneralFitness);
        let goals = selection.finish().expect("Selection should be complete");
        assert_eq!(goals, UserGoals::new(Goal::GeneralFitness, []));
    }

    #[test]
    fn test_plan_helpers() {
        let plan = create_test_plan();
        assert_eq!(plan.rest_days(), 1);
        assert!(plan.is_renderable());
        assert!(plan.weekly_plan[1].is_rest_day());
        assert_eq!(plan.find_exercise("burpee").map(|e| e.sets), Some(1));

        let empty = WorkoutPlan {
            plan_summary: String::new(),
            weekly_plan: vec![],
        };
        assert!(!empty.is_renderable());
    }

    #[test]
    fn test_exercise_optional_fields_omitted() {
        let exercise = Exercise {
            name: "Squat".to_string(),
            sets: 4,
            reps: "6-8".to_string(),
            rest: 120,
            description: None,
            image: None,
        };
        assert_eq!(
            serde_json::to_value(&exercise).unwrap(),
            json!({ "name": "Squat", "sets": 4, "reps": "6-8", "rest": 120 })
        );
    }

    #[test]
    fn test_apply_detail_and_image_parts() {
        let detail = ExerciseDetail {
            description: "Keep your back straight.".to_string(),
            image: "data:image/jpeg;base64,AAAA".to_string(),
        };
        assert_eq!(detail.image_parts(), Some(("image/jpeg", "AAAA")));

        let mut day: DailyWorkout = create_test_plan().weekly_plan.remove(0);
        day.exercises[0].apply_detail(&detail);
        assert_eq!(
            day.exercises[0].description.as_deref(),
            Some("Keep your back straight.")
        );
        assert!(day.exercises[1].image.is_none());
    }
}
