//! Integration tests comparing CLI output with the core Display impls
//!
//! With `--no-color` the CLI prints the markdown from the core unchanged, so
//! any other front end rendering the same types shows the same content.

use std::process::Command;

use coach_core::{
    store::{write_json, WORKOUT_PLAN_KEY},
    CoachBuilder, DailyWorkout, DashboardView, Exercise, WizardState, WorkoutPlan,
};
use tempfile::TempDir;

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_coach"));
    cmd.env_remove("GEMINI_API_KEY")
        .arg("--no-color")
        .arg("--database-file")
        .arg(db_path);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

fn plan() -> WorkoutPlan {
    let day = |day: &str, focus: &str, exercises: Vec<Exercise>| DailyWorkout {
        day: day.to_string(),
        focus: focus.to_string(),
        exercises,
    };
    WorkoutPlan {
        plan_summary: "Full body three times a week.".to_string(),
        weekly_plan: vec![
            day(
                "Monday",
                "Full Body",
                vec![Exercise {
                    name: "Deadlift".to_string(),
                    sets: 3,
                    reps: "5".to_string(),
                    rest: 180,
                    description: None,
                    image: None,
                }],
            ),
            day("Tuesday", "Rest Day", vec![]),
            day(
                "Wednesday",
                "Full Body",
                vec![Exercise {
                    name: "Push-up".to_string(),
                    sets: 3,
                    reps: "12-15".to_string(),
                    rest: 60,
                    description: None,
                    image: None,
                }],
            ),
        ],
    }
}

#[tokio::test]
async fn test_dashboard_display_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    {
        let store = CoachBuilder::new()
            .with_database_path(Some(&db_path))
            .build_store()
            .await
            .expect("Failed to create store");
        write_json(&store, WORKOUT_PLAN_KEY, &plan()).unwrap();
    }

    let cli_output = run_cli_command(db_str, &["show"]);
    let direct_output = DashboardView::new(plan(), None).to_string();
    assert_eq!(cli_output, direct_output);

    let mut view = DashboardView::new(plan(), None);
    view.select_day(2).unwrap();
    let cli_output = run_cli_command(db_str, &["show", "--day", "3"]);
    assert_eq!(cli_output, view.to_string());
}

#[test]
fn test_wizard_display_consistency() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    assert_eq!(
        run_cli_command(db_str, &["goals"]),
        WizardState::Goals.to_string()
    );
    assert_eq!(
        run_cli_command(db_str, &["show"]),
        WizardState::Welcome.to_string()
    );
}
