#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use coach_core::{
    provider::{AnalysisProvider, ProviderError, ProviderResult},
    BodyAnalysis, ConnectivityFlag, DailyWorkout, Exercise, ExerciseDetail, MemoryStore, Photo,
    UserGoals, Wizard, WorkoutPlan,
};
use tokio::sync::Notify;

pub type TestWizard = Wizard<Arc<MemoryStore>, Arc<FakeProvider>, Arc<ConnectivityFlag>>;

/// Provider double that counts calls and can fail or pause on demand.
#[derive(Default)]
pub struct FakeProvider {
    pub fail_analysis: AtomicBool,
    pub fail_plan: AtomicBool,
    pub fail_detail: AtomicBool,
    pub empty_plan: AtomicBool,
    pub analyze_calls: AtomicUsize,
    pub plan_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
    pub analysis_texts: Mutex<Vec<String>>,
    /// When set, plan generation waits for a notification before answering
    pub plan_gate: Option<Arc<Notify>>,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            plan_gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn analyze_calls(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }

    pub fn plan_calls(&self) -> usize {
        self.plan_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn last_analysis_text(&self) -> Option<String> {
        self.analysis_texts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl AnalysisProvider for FakeProvider {
    async fn analyze_image(&self, _photo: &Photo) -> ProviderResult<BodyAnalysis> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_analysis.load(Ordering::SeqCst) {
            return Err(ProviderError::Invariant("analysis failed".to_string()));
        }
        Ok(sample_analysis())
    }

    async fn generate_plan(
        &self,
        analysis: &str,
        _goals: &UserGoals,
    ) -> ProviderResult<WorkoutPlan> {
        self.plan_calls.fetch_add(1, Ordering::SeqCst);
        self.analysis_texts
            .lock()
            .unwrap()
            .push(analysis.to_string());
        if let Some(gate) = &self.plan_gate {
            gate.notified().await;
        }
        if self.fail_plan.load(Ordering::SeqCst) {
            return Err(ProviderError::Invariant("plan failed".to_string()));
        }
        if self.empty_plan.load(Ordering::SeqCst) {
            return Ok(WorkoutPlan {
                plan_summary: "Nothing".to_string(),
                weekly_plan: vec![],
            });
        }
        Ok(sample_plan())
    }

    async fn exercise_detail(&self, name: &str) -> ProviderResult<ExerciseDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_detail.load(Ordering::SeqCst) {
            return Err(ProviderError::Invariant("illustration failed".to_string()));
        }
        Ok(ExerciseDetail {
            description: format!("How to perform {name}."),
            image: "data:image/jpeg;base64,AAAA".to_string(),
        })
    }
}

pub fn sample_analysis() -> BodyAnalysis {
    BodyAnalysis {
        analysis: "Solid foundation with room to build upper body mass.".to_string(),
        focus_areas: vec!["Upper Body Strength".to_string(), "Core Stability".to_string()],
    }
}

fn exercise(name: &str, sets: u32, reps: &str, rest: u32) -> Exercise {
    Exercise {
        name: name.to_string(),
        sets,
        reps: reps.to_string(),
        rest,
        description: None,
        image: None,
    }
}

fn training_day(day: &str, focus: &str, exercises: Vec<Exercise>) -> DailyWorkout {
    DailyWorkout {
        day: day.to_string(),
        focus: focus.to_string(),
        exercises,
    }
}

fn rest_day(day: &str) -> DailyWorkout {
    training_day(day, "Rest Day", vec![])
}

/// Seven days, two of them rest days.
pub fn sample_plan() -> WorkoutPlan {
    WorkoutPlan {
        plan_summary: "A hypertrophy-focused week with two recovery days.".to_string(),
        weekly_plan: vec![
            training_day(
                "Monday",
                "Chest and Triceps",
                vec![
                    exercise("Bench Press", 4, "8-10", 90),
                    exercise("Dips", 3, "10-12", 60),
                ],
            ),
            training_day("Tuesday", "Back", vec![exercise("Pull-up", 4, "6-8", 120)]),
            rest_day("Wednesday"),
            training_day("Thursday", "Legs", vec![exercise("Squat", 5, "5", 180)]),
            training_day(
                "Friday",
                "Shoulders",
                vec![exercise("Overhead Press", 4, "8", 90)],
            ),
            training_day(
                "Saturday",
                "Conditioning",
                vec![exercise("Kettlebell Swing", 1, "AMRAP 10min", 0)],
            ),
            rest_day("Sunday"),
        ],
    }
}

pub fn sample_photo() -> Photo {
    Photo::from_bytes(b"\xff\xd8\xff\xe0 fake jpeg", "image/jpeg").expect("valid photo")
}

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub provider: Arc<FakeProvider>,
    pub connectivity: Arc<ConnectivityFlag>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_provider(FakeProvider::new())
    }

    pub fn with_provider(provider: FakeProvider) -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            provider: Arc::new(provider),
            connectivity: Arc::new(ConnectivityFlag::online()),
        }
    }

    pub fn wizard(&self) -> TestWizard {
        Wizard::start_up(
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
            Arc::clone(&self.connectivity),
        )
        .expect("Failed to start wizard")
    }
}
