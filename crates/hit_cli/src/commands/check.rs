//! Scenario validation command.

use crate::scenario::ScenarioFile;
use anyhow::{anyhow, bail, Result};
use console::style;
use hit_core::{Pipeline, Step};
use std::path::PathBuf;

/// The calls a scenario runs, in execution order, after clear steps
/// removed what they address.
pub fn resolved_calls(steps: Vec<Step>) -> Result<Vec<(String, String)>> {
    let steps = Pipeline::new(steps)
        .resolve()
        .map_err(|(step, err)| anyhow!("{step}: {err}"))?;
    Ok(steps
        .iter()
        .map(|step| (step.phase().to_string(), step.call().to_string()))
        .collect())
}

/// Parse scenario files and print their steps.
pub fn run(files: &[PathBuf]) -> Result<()> {
    let mut invalid = 0;
    for path in files {
        println!("{}", style(path.display()).bold());
        let file = match ScenarioFile::load(path) {
            Ok(file) => file,
            Err(err) => {
                println!("  {} {err:#}", style("×").red());
                invalid += 1;
                continue;
            }
        };

        for scenario in &file.scenarios {
            let calls = file.steps(scenario).and_then(resolved_calls);
            match calls {
                Ok(calls) => {
                    println!("  {} {}", style("✓").green(), scenario.description);
                    for (phase, call) in calls {
                        println!("      {:<8} {}", style(phase).dim(), call);
                    }
                }
                Err(err) => {
                    println!("  {} {}: {err:#}", style("×").red(), scenario.description);
                    invalid += 1;
                }
            }
        }
    }

    if invalid > 0 {
        bail!("{invalid} invalid scenario(s)");
    }
    Ok(())
}
