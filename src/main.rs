mod cli;
mod logging;
mod npm;
mod pipeline;
mod project;
mod scaffold;
mod templates;

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = cli::parse();
    let config = project::ProjectConfig::from_cli(&cli)?;
    pipeline::run(&config)
}
