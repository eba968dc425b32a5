//! Command handlers.
//!
//! Each command builds the wizard or loader it needs on top of the shared
//! store, provider and connectivity flag, runs one operation and renders the
//! resulting markdown.

use std::{fs, path::Path, sync::Arc};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use coach_core::{
    display::CachedExercises,
    provider::{ProviderError, ProviderResult},
    AnalysisProvider, BodyAnalysis, CoachError, Connectivity, ConnectivityFlag, Exercise,
    ExerciseDetail, ExerciseDetailLoader, OperationStatus, Photo, SqliteStore, UserGoals, Wizard,
    WizardState, WizardStep, WorkoutPlan,
};
use log::{debug, info};

use crate::{
    args::{ExerciseArgs, PlanArgs, ShowArgs},
    renderer::TerminalRenderer,
};

type CliWizard = Wizard<Arc<SqliteStore>, Arc<dyn AnalysisProvider>, Arc<ConnectivityFlag>>;
type CliLoader =
    ExerciseDetailLoader<Arc<SqliteStore>, Arc<dyn AnalysisProvider>, Arc<ConnectivityFlag>>;

const MISSING_API_KEY_MESSAGE: &str =
    "No Gemini API key configured. Pass --api-key or set GEMINI_API_KEY.";

pub struct Cli {
    store: Arc<SqliteStore>,
    provider: Arc<dyn AnalysisProvider>,
    has_api_key: bool,
    connectivity: Arc<ConnectivityFlag>,
    renderer: TerminalRenderer,
}

impl Cli {
    /// Without a provider, cached data stays usable and anything that
    /// would reach the network fails with a configuration error.
    pub fn new(
        store: SqliteStore,
        provider: Option<Arc<dyn AnalysisProvider>>,
        connectivity: ConnectivityFlag,
        renderer: TerminalRenderer,
    ) -> Self {
        let has_api_key = provider.is_some();
        Self {
            store: Arc::new(store),
            provider: provider.unwrap_or_else(|| Arc::new(MissingApiKey)),
            has_api_key,
            connectivity: Arc::new(connectivity),
            renderer,
        }
    }

    /// Fails when a network call is about to be made without an API key.
    /// Offline runs are left to the connectivity guard.
    fn require_api_key(&self) -> coach_core::Result<()> {
        if self.has_api_key || !self.connectivity.is_online() {
            Ok(())
        } else {
            Err(CoachError::configuration(MISSING_API_KEY_MESSAGE))
        }
    }

    fn wizard(&self) -> Result<CliWizard> {
        Wizard::start_up(
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
            Arc::clone(&self.connectivity),
        )
        .context("Failed to restore cached plan")
    }

    fn loader(&self) -> CliLoader {
        ExerciseDetailLoader::new(
            Arc::clone(&self.store),
            Arc::clone(&self.provider),
            Arc::clone(&self.connectivity),
        )
    }

    pub fn show(&self, ShowArgs { day }: ShowArgs) -> Result<()> {
        let wizard = self.wizard()?;
        if let Some(message) = wizard.last_error() {
            self.renderer.render(&OperationStatus::failure(message));
        }

        let Some(mut dashboard) = wizard.dashboard() else {
            self.renderer.render(&wizard.state());
            return Ok(());
        };

        if let Some(day) = day {
            dashboard
                .select_day((day - 1) as usize)
                .map_err(|e| anyhow!(e.user_message()))?;
        }
        self.renderer.render(&dashboard);
        Ok(())
    }

    pub fn goals(&self) {
        self.renderer.render(&WizardState::Goals);
    }

    pub async fn plan(&self, args: PlanArgs) -> Result<()> {
        let wizard = self.wizard()?;
        if wizard.step() != WizardStep::Welcome {
            bail!("A plan already exists. Run `coach reset` to start over.");
        }

        // Read the photo before any state changes so a bad path fails fast
        let photo = args
            .photo
            .as_deref()
            .map(Photo::from_path)
            .transpose()
            .context("Failed to read photo")?;

        wizard.start()?;
        wizard
            .submit_goals(UserGoals::new(args.primary, args.secondary))
            .map_err(|e| anyhow!(e.user_message()))?;
        self.require_api_key()
            .map_err(|e| anyhow!(e.user_message()))?;

        let outcome = match photo {
            Some(photo) => wizard.submit_photo(photo).await,
            None => wizard.skip_photo().await,
        };
        if let Err(e) = outcome {
            debug!("Plan generation failed: {e}");
            let message = wizard.last_error().unwrap_or_else(|| e.user_message());
            return Err(anyhow!(message));
        }

        info!("Generated a new plan");
        match wizard.dashboard() {
            Some(dashboard) => self.renderer.render(&dashboard),
            None => self.renderer.render(&wizard.state()),
        }
        Ok(())
    }

    pub async fn exercise(&self, args: ExerciseArgs) -> Result<()> {
        let loader = self.loader();
        let cached = loader
            .cached(&args.name)
            .context("Failed to read cached exercise details")?;
        let detail = match cached {
            Some(detail) => detail,
            None => {
                self.require_api_key()
                    .map_err(|e| anyhow!(e.detail_message()))?;
                loader
                    .load(&args.name)
                    .await
                    .map_err(|e| anyhow!(e.detail_message()))?
            }
        };

        // Fold the details into the cached plan so the planned sets show too
        let planned = self.wizard()?.dashboard().and_then(|mut view| {
            view.apply_detail(&args.name, &detail);
            view.plan().find_exercise(&args.name).cloned()
        });
        self.renderer.render_markdown(&format_exercise(
            &args.name,
            planned.as_ref(),
            &detail,
        ));

        if let Some(path) = args.save_image {
            save_illustration(&detail, &path)?;
            self.renderer
                .render(&OperationStatus::illustration_saved(path));
        }
        Ok(())
    }

    pub fn reset(&self) -> Result<()> {
        self.wizard()?.reset().context("Failed to clear cached plan")?;
        self.renderer
            .render(&OperationStatus::success("Cleared your plan and analysis."));
        Ok(())
    }

    pub fn cached(&self) -> Result<()> {
        let mut names = self
            .loader()
            .cached_names()
            .context("Failed to list cached exercises")?;
        names.sort();
        self.renderer.render(&CachedExercises(&names));
        Ok(())
    }
}

fn format_exercise(name: &str, planned: Option<&Exercise>, detail: &ExerciseDetail) -> String {
    let mut markdown = format!("# {name}\n\n");
    if let Some(exercise) = planned {
        markdown.push_str(&format!("{exercise}\n\n"));
    }
    markdown.push_str(&detail.to_string());
    markdown
}

fn save_illustration(detail: &ExerciseDetail, path: &Path) -> Result<()> {
    let (_, payload) = detail
        .image_parts()
        .ok_or_else(|| anyhow!("The cached illustration is not an inline image"))?;
    let bytes = STANDARD
        .decode(payload)
        .context("Failed to decode illustration")?;
    fs::write(path, bytes)
        .with_context(|| format!("Failed to write illustration to {}", path.display()))
}

/// Stands in for the Gemini client when no API key is configured. The
/// handlers check [`Cli::require_api_key`] before it could be reached.
struct MissingApiKey;

impl MissingApiKey {
    fn error() -> ProviderError {
        ProviderError::Invariant(MISSING_API_KEY_MESSAGE.to_string())
    }
}

#[async_trait]
impl AnalysisProvider for MissingApiKey {
    async fn analyze_image(&self, _photo: &Photo) -> ProviderResult<BodyAnalysis> {
        Err(Self::error())
    }

    async fn generate_plan(
        &self,
        _analysis: &str,
        _goals: &UserGoals,
    ) -> ProviderResult<WorkoutPlan> {
        Err(Self::error())
    }

    async fn exercise_detail(&self, _name: &str) -> ProviderResult<ExerciseDetail> {
        Err(Self::error())
    }
}
