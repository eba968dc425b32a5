//! The onboarding wizard state machine.
//!
//! ```text
//! WELCOME --start--> GOALS --submit_goals--> PHOTOS
//! PHOTOS --submit_photo / skip_photo--> ANALYZING --ok--> DASHBOARD
//!                                        ANALYZING --err--> PHOTOS
//! DASHBOARD --reset--> WELCOME
//! ```
//!
//! All operations take `&self`. The state lives behind a mutex that is never
//! held across an `.await`, so a [`Wizard::reset`] can run while a provider
//! call is suspended. Each analysis run is stamped with an epoch; a result
//! that comes back after a reset (or otherwise outside `Analyzing`) is
//! dropped without touching the store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::{info, warn};

use crate::{
    connectivity::Connectivity,
    dashboard::DashboardView,
    error::{
        CoachError, Result, MISSING_PLAN_MESSAGE, OFFLINE_PLAN_MESSAGE, PROVIDER_PLAN_MESSAGE,
    },
    hydration::{self, Hydration},
    models::{BodyAnalysis, Photo, UserGoals, WorkoutPlan},
    provider::{AnalysisProvider, ProviderError, ProviderResult},
    store::KeyValueStore,
};

pub mod state;

pub use state::{WizardState, WizardStep, ANALYZING_PHOTO_MESSAGE, GENERATING_PLAN_MESSAGE};

struct Inner {
    state: WizardState,
    error: Option<String>,
    epoch: u64,
}

/// Drives one user through onboarding and holds the resulting plan.
pub struct Wizard<S, P, C> {
    store: S,
    provider: P,
    connectivity: C,
    inner: Mutex<Inner>,
}

impl<S, P, C> Wizard<S, P, C>
where
    S: KeyValueStore,
    P: AnalysisProvider,
    C: Connectivity,
{
    /// Creates a wizard, restoring the dashboard from the store when a
    /// cached plan is available and starting at Welcome otherwise.
    ///
    /// # Errors
    ///
    /// Returns store failures. Corrupt cache entries are cleared, not
    /// reported.
    pub fn start_up(store: S, provider: P, connectivity: C) -> Result<Self> {
        let wizard = Self {
            store,
            provider,
            connectivity,
            inner: Mutex::new(Inner {
                state: WizardState::Welcome,
                error: None,
                epoch: 0,
            }),
        };

        if let Hydration::Restored { plan, analysis } = hydration::hydrate(&wizard.store)? {
            let mut inner = wizard.lock();
            match wizard.enter_dashboard(&mut inner, plan, analysis) {
                // An unusable cached plan has already been reset and
                // recorded in last_error.
                Ok(()) | Err(CoachError::Provider(_)) => {}
                Err(e) => return Err(e),
            }
        }

        info!("Wizard started at {}", wizard.step());
        Ok(wizard)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> WizardState {
        self.lock().state.clone()
    }

    pub fn step(&self) -> WizardStep {
        self.lock().state.step()
    }

    /// The message of the last failed operation, if it has not been
    /// dismissed.
    pub fn last_error(&self) -> Option<String> {
        self.lock().error.clone()
    }

    pub fn dismiss_error(&self) {
        self.lock().error = None;
    }

    /// Dashboard view of the current plan, when on the Dashboard step.
    pub fn dashboard(&self) -> Option<DashboardView> {
        match &self.lock().state {
            WizardState::Dashboard { plan, analysis } => {
                Some(DashboardView::new(plan.clone(), analysis.clone()))
            }
            _ => None,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn connectivity(&self) -> &C {
        &self.connectivity
    }

    /// WELCOME → GOALS.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidTransition` outside the Welcome step.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.lock();
        expect_step(&inner.state, WizardStep::Welcome, "start onboarding")?;
        inner.state = WizardState::Goals;
        inner.error = None;
        info!("Wizard moved to {}", WizardStep::Goals);
        Ok(())
    }

    /// GOALS → PHOTOS, keeping `goals` for the analysis.
    ///
    /// # Errors
    ///
    /// Returns `CoachError::InvalidTransition` outside the Goals step and
    /// `CoachError::Validation` for an incomplete selection. Either way the
    /// state is unchanged.
    pub fn submit_goals(&self, goals: UserGoals) -> Result<()> {
        let mut inner = self.lock();
        expect_step(&inner.state, WizardStep::Goals, "submit goals")?;
        goals.validate()?;
        inner.state = WizardState::Photos { goals };
        inner.error = None;
        info!("Wizard moved to {}", WizardStep::Photos);
        Ok(())
    }

    /// PHOTOS → ANALYZING → DASHBOARD using a photo analysis.
    ///
    /// The photo is dropped once the request finishes, whatever the outcome.
    ///
    /// # Errors
    ///
    /// - `CoachError::Offline` without connectivity (state stays Photos)
    /// - `CoachError::Provider` if either generation fails (back to Photos)
    /// - `CoachError::InvalidTransition` outside Photos, including while an
    ///   analysis is already running
    /// - `CoachError::Superseded` if the wizard was reset meanwhile
    pub async fn submit_photo(&self, photo: Photo) -> Result<()> {
        let (ticket, goals) = self.begin_analysis("submit a photo", ANALYZING_PHOTO_MESSAGE)?;

        let outcome = async {
            let analysis = self.provider.analyze_image(&photo).await?;
            self.report_progress(ticket, GENERATING_PLAN_MESSAGE);
            let plan = self
                .provider
                .generate_plan(&analysis.analysis, &goals)
                .await?;
            Ok::<_, ProviderError>((plan, Some(analysis)))
        }
        .await;
        drop(photo);

        self.finish_analysis(ticket, goals, outcome)
    }

    /// PHOTOS → ANALYZING → DASHBOARD from goals alone. Any cached analysis
    /// is removed on success.
    ///
    /// # Errors
    ///
    /// Same as [`Wizard::submit_photo`].
    pub async fn skip_photo(&self) -> Result<()> {
        let (ticket, goals) = self.begin_analysis("skip the photo", GENERATING_PLAN_MESSAGE)?;

        let outcome = self
            .provider
            .generate_plan("", &goals)
            .await
            .map(|plan| (plan, None));

        self.finish_analysis(ticket, goals, outcome)
    }

    /// Any step → WELCOME. Clears goals, any in-flight result and the
    /// cached plan and analysis.
    ///
    /// # Errors
    ///
    /// Returns store failures; the in-memory state is reset regardless.
    pub fn reset(&self) -> Result<()> {
        let mut inner = self.lock();
        self.reset_locked(&mut inner);
        info!("Wizard reset");
        hydration::clear(&self.store)
    }

    fn reset_locked(&self, inner: &mut Inner) {
        inner.state = WizardState::Welcome;
        inner.error = None;
        inner.epoch += 1;
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Checks preconditions and enters Analyzing. Returns the run's epoch
    /// and the goals to generate for.
    fn begin_analysis(&self, action: &str, message: &str) -> Result<(u64, UserGoals)> {
        let mut inner = self.lock();
        let goals = match &inner.state {
            WizardState::Photos { goals } => goals.clone(),
            other => return Err(invalid_transition(action, other)),
        };

        if !self.connectivity.is_online() {
            warn!("Refusing to {action}: offline");
            inner.error = Some(OFFLINE_PLAN_MESSAGE.to_string());
            return Err(CoachError::offline("generate a workout plan"));
        }

        inner.epoch += 1;
        inner.error = None;
        inner.state = WizardState::Analyzing {
            goals: goals.clone(),
            message: message.to_string(),
        };
        info!("Wizard moved to {} ({message})", WizardStep::Analyzing);
        Ok((inner.epoch, goals))
    }

    fn report_progress(&self, ticket: u64, progress: &str) {
        let mut inner = self.lock();
        if inner.epoch != ticket {
            return;
        }
        if let WizardState::Analyzing { message, .. } = &mut inner.state {
            *message = progress.to_string();
        }
    }

    fn finish_analysis(
        &self,
        ticket: u64,
        goals: UserGoals,
        outcome: ProviderResult<(WorkoutPlan, Option<BodyAnalysis>)>,
    ) -> Result<()> {
        let mut inner = self.lock();
        if inner.epoch != ticket || inner.state.step() != WizardStep::Analyzing {
            warn!("Discarding generation result: wizard moved on");
            return Err(CoachError::Superseded);
        }

        let (plan, analysis) = match outcome {
            Ok(result) => result,
            Err(e) => {
                warn!("Plan generation failed: {e}");
                inner.state = WizardState::Photos { goals };
                inner.error = Some(PROVIDER_PLAN_MESSAGE.to_string());
                return Err(e.into());
            }
        };

        if plan.is_renderable() {
            if let Err(e) = hydration::persist_result(&self.store, &plan, analysis.as_ref()) {
                warn!("Failed to cache generated plan: {e}");
                inner.state = WizardState::Photos { goals };
                inner.error = Some(PROVIDER_PLAN_MESSAGE.to_string());
                return Err(e);
            }
        }
        self.enter_dashboard(&mut inner, plan, analysis)
    }

    /// Enters the dashboard, or falls back to a reset when the plan has
    /// nothing to show.
    fn enter_dashboard(
        &self,
        inner: &mut Inner,
        plan: WorkoutPlan,
        analysis: Option<BodyAnalysis>,
    ) -> Result<()> {
        if !plan.is_renderable() {
            warn!("Plan has no days to show; resetting");
            self.reset_locked(inner);
            inner.error = Some(MISSING_PLAN_MESSAGE.to_string());
            hydration::clear(&self.store)?;
            return Err(ProviderError::Invariant("Workout plan has no days".to_string()).into());
        }

        inner.state = WizardState::Dashboard { plan, analysis };
        inner.error = None;
        info!("Wizard moved to {}", WizardStep::Dashboard);
        Ok(())
    }
}

fn expect_step(state: &WizardState, expected: WizardStep, action: &str) -> Result<()> {
    if state.step() == expected {
        Ok(())
    } else {
        Err(invalid_transition(action, state))
    }
}

fn invalid_transition(action: &str, state: &WizardState) -> CoachError {
    CoachError::InvalidTransition {
        action: action.to_string(),
        state: state.step().to_string(),
    }
}
