use std::env;

use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;

use crate::cli::Cli;

/// Which template set and dependency lists a run uses. Chosen once from the
/// CLI and immutable for the process lifetime.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Variant {
    JavaScript,
    TypeScript,
}

impl Variant {
    pub fn is_typescript(self) -> bool {
        matches!(self, Variant::TypeScript)
    }
}

/// Immutable per-run configuration threaded into every pipeline stage.
#[derive(Clone, Debug)]
pub struct ProjectConfig {
    pub variant: Variant,
    pub project_dir: Utf8PathBuf,
    pub package_name: String,
}

impl ProjectConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let cwd = env::current_dir().context("resolving current directory")?;
        let project_dir = match &cli.path {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => cwd.join(path),
            None => cwd,
        };
        let project_dir = Utf8PathBuf::from_path_buf(project_dir)
            .map_err(|path| anyhow!("project directory {} is not valid UTF-8", path.display()))?;

        let variant = if cli.typescript {
            Variant::TypeScript
        } else {
            Variant::JavaScript
        };

        let package_name = package_name_for(&project_dir);

        Ok(ProjectConfig {
            variant,
            project_dir,
            package_name,
        })
    }
}

const FALLBACK_PACKAGE_NAME: &str = "ink-app";

/// Derive the npm package name from the project directory's base name.
fn package_name_for(project_dir: &Utf8PathBuf) -> String {
    let base = project_dir.file_name().unwrap_or(FALLBACK_PACKAGE_NAME);
    slugify(base)
}

/// Fold an arbitrary directory name into a package-name-safe slug: lowercase,
/// hyphen-separated, alphanumeric plus `-` and `_` only.
fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        FALLBACK_PACKAGE_NAME.to_owned()
    } else {
        slug
    }
}
