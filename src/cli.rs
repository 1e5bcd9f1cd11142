use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "create-ink-app",
    version,
    about = "Scaffold out an Ink-based CLI project"
)]
pub struct Cli {
    /// Directory to generate the project in (default: current directory)
    #[arg()]
    pub path: Option<PathBuf>,

    /// Generate the TypeScript variant of the project
    #[arg(long = "typescript")]
    pub typescript: bool,
}

/// Helper entry point so `main` can stay minimal.
pub fn parse() -> Cli {
    Cli::parse()
}
