use anyhow::{Context, Result};
use tracing::debug;

use crate::npm::Npm;
use crate::project::ProjectConfig;
use crate::scaffold;

/// The three pipeline stages, in execution order. Each stage starts only
/// after the previous one has fully finished; no stage retries.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Stage {
    CopyFiles,
    InstallDependencies,
    LinkExecutable,
}

impl Stage {
    const ORDER: [Stage; 3] = [
        Stage::CopyFiles,
        Stage::InstallDependencies,
        Stage::LinkExecutable,
    ];

    fn title(self) -> &'static str {
        match self {
            Stage::CopyFiles => "Copy files",
            Stage::InstallDependencies => "Install dependencies",
            Stage::LinkExecutable => "Link executable",
        }
    }
}

/// Typed per-stage result. A fatal failure is an `Err` from the stage; a
/// soft failure completes the pipeline with a recorded warning.
#[derive(Clone, Debug, Eq, PartialEq)]
enum StageOutcome {
    Completed,
    Skipped(String),
}

pub fn run(config: &ProjectConfig) -> Result<()> {
    let npm = Npm::new(&config.project_dir);
    run_with(config, &npm)
}

fn run_with(config: &ProjectConfig, npm: &Npm) -> Result<()> {
    println!();
    for stage in Stage::ORDER {
        match run_stage(stage, config, npm)
            .with_context(|| format!("{} failed", stage.title()))?
        {
            StageOutcome::Completed => println!("[ok] {}", stage.title()),
            StageOutcome::Skipped(reason) => println!("[warn] {}: {}", stage.title(), reason),
        }
    }
    println!(
        "\nScaffolded `{}` in {}",
        config.package_name, config.project_dir
    );
    Ok(())
}

fn run_stage(stage: Stage, config: &ProjectConfig, npm: &Npm) -> Result<StageOutcome> {
    match stage {
        Stage::CopyFiles => {
            scaffold::copy_files(config)?;
            Ok(StageOutcome::Completed)
        }
        Stage::InstallDependencies => {
            // Both installs mutate the manifest and lockfile, so the dev
            // install only starts after the runtime install succeeds.
            npm.install_runtime_dependencies(config.variant)?;
            npm.install_dev_dependencies(config.variant)?;
            Ok(StageOutcome::Completed)
        }
        Stage::LinkExecutable => {
            // Linking needs built artifacts for the TypeScript variant; a
            // build failure is fatal, unlike the link step itself.
            if config.variant.is_typescript() {
                npm.build()?;
            }
            match npm.link() {
                Ok(()) => Ok(StageOutcome::Completed),
                Err(err) => {
                    debug!(error = %err, "npm link failed");
                    Ok(StageOutcome::Skipped(
                        "npm link failed, please try running with sudo".to_owned(),
                    ))
                }
            }
        }
    }
}
