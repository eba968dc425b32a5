use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};
use coach_core::{
    provider::gemini::{DEFAULT_LANGUAGE, DEFAULT_TEXT_MODEL},
    Goal,
};

/// AI personal trainer in the terminal
///
/// Coach builds a weekly workout plan from your fitness goals and, if you
/// provide one, a photo of your physique. The last plan is cached locally so
/// it can be shown again without a network connection, along with any
/// exercise guides you have looked up.
#[derive(Parser)]
#[command(version, about, name = "coach")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/coach/coach.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Behave as if there were no network connection
    #[arg(long, global = true)]
    pub offline: bool,

    /// Gemini API key
    #[arg(long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Language the analysis and plan are written in
    #[arg(long, global = true, env = "COACH_LANGUAGE", default_value = DEFAULT_LANGUAGE)]
    pub language: String,

    /// Text model used for analysis, plans and exercise guides
    #[arg(long, global = true, env = "COACH_MODEL", default_value = DEFAULT_TEXT_MODEL)]
    pub model: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the cached plan, or the welcome screen when there is none
    #[command(alias = "s")]
    Show(ShowArgs),
    /// List the available fitness goals
    #[command(alias = "g")]
    Goals,
    /// Generate a new weekly plan
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Show the guide for an exercise, fetching it on first use
    #[command(alias = "e")]
    Exercise(ExerciseArgs),
    /// Forget the cached plan and analysis
    Reset,
    /// List exercises whose guides are cached
    Cached,
}

#[derive(ClapArgs, Default)]
pub struct ShowArgs {
    /// Day of the week to expand (1-7)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub day: Option<u32>,
}

#[derive(ClapArgs)]
pub struct PlanArgs {
    /// Primary goal, e.g. muscle-gain
    #[arg(long)]
    pub primary: Goal,

    /// Secondary goal; repeat for up to two
    #[arg(long = "secondary")]
    pub secondary: Vec<Goal>,

    /// JPEG or PNG photo of your physique
    #[arg(long, required_unless_present = "skip_photo", conflicts_with = "skip_photo")]
    pub photo: Option<PathBuf>,

    /// Generate a plan from goals alone
    #[arg(long)]
    pub skip_photo: bool,
}

#[derive(ClapArgs)]
pub struct ExerciseArgs {
    /// Exercise name as it appears in the plan
    pub name: String,

    /// Write the illustration to this file
    #[arg(long)]
    pub save_image: Option<PathBuf>,
}
