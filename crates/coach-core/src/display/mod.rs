//! Markdown formatting for terminal output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! the wizard and dashboard get their own formatting in [`views`]. The CLI
//! feeds the resulting markdown to its terminal renderer.
//!
//! ```rust
//! use coach_core::{
//!     display::OperationStatus,
//!     models::{DailyWorkout, WorkoutPlan},
//! };
//!
//! let plan = WorkoutPlan {
//!     plan_summary: "Build a habit.".to_string(),
//!     weekly_plan: vec![DailyWorkout {
//!         day: "Monday".to_string(),
//!         focus: "Rest Day".to_string(),
//!         exercises: vec![],
//!     }],
//! };
//! let output = plan.to_string();
//! assert!(output.contains("## Monday: Rest Day"));
//!
//! let status = OperationStatus::success("Plan cleared");
//! assert!(status.to_string().contains("Success:"));
//! ```

pub mod models;
pub mod status;
pub mod views;

pub use status::OperationStatus;
pub use views::CachedExercises;
