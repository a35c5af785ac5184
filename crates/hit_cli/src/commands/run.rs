//! Scenario execution command.

use crate::scenario::ScenarioFile;
use anyhow::{bail, Context, Result};
use console::style;
use hit_core::{do_steps_with, Config, StepError};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Result of one scenario.
pub struct Outcome {
    pub file: PathBuf,
    pub description: String,
    pub failure: Option<StepError>,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::load_or_default(Path::new("."))?,
    };
    Ok(config)
}

/// Runs every scenario of `file`, stopping after the first failure if
/// `fail_fast` is set.
pub fn execute(
    path: &Path,
    file: &ScenarioFile,
    config: &Config,
    fail_fast: bool,
    mut progress: impl FnMut(&str),
) -> Result<Vec<Outcome>> {
    let mut outcomes = Vec::with_capacity(file.scenarios.len());
    for scenario in &file.scenarios {
        progress(&scenario.description);
        let steps = file.steps(scenario)?;
        debug!(scenario = %scenario.description, steps = steps.len(), "running scenario");
        let failure = do_steps_with(config.clone(), steps).err();
        let failed = failure.is_some();
        outcomes.push(Outcome {
            file: path.to_path_buf(),
            description: scenario.description.clone(),
            failure,
        });
        if failed && fail_fast {
            break;
        }
    }
    Ok(outcomes)
}

fn print_outcome(outcome: &Outcome) {
    match &outcome.failure {
        None => println!("  {} {}", style("✓").green(), outcome.description),
        Some(err) => {
            println!("  {} {}", style("×").red(), style(&outcome.description).red());
            for line in err.to_string().lines() {
                println!("      {line}");
            }
        }
    }
}

/// Run scenario files.
pub fn run(files: &[PathBuf], config: Option<&Path>, fail_fast: bool) -> Result<()> {
    let config = load_config(config)?;

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let mut outcomes = Vec::new();
    for path in files {
        let file = ScenarioFile::load(path)?;
        let results = execute(path, &file, &config, fail_fast, |description| {
            spinner.set_message(description.to_string())
        })?;
        let failed = results.iter().any(|outcome| !outcome.passed());
        outcomes.extend(results);
        if failed && fail_fast {
            break;
        }
    }
    spinner.finish_and_clear();

    let mut current: Option<&Path> = None;
    for outcome in &outcomes {
        if current != Some(outcome.file.as_path()) {
            println!("{}", style(outcome.file.display()).bold());
            current = Some(outcome.file.as_path());
        }
        print_outcome(outcome);
    }

    let failed = outcomes.iter().filter(|outcome| !outcome.passed()).count();
    println!();
    if failed > 0 {
        bail!("{failed} of {} scenarios failed", outcomes.len());
    }
    println!(
        "{} {}",
        style("✓").green(),
        style(format!("{} scenarios passed", outcomes.len())).green()
    );
    Ok(())
}
