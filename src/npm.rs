use std::process::Command;

use anyhow::{Context, Result, bail};
use camino::{Utf8Path, Utf8PathBuf};
use tracing::debug;

use crate::project::Variant;

/// Dependencies installed for every generated project.
const RUNTIME_DEPENDENCIES: [&str; 3] = ["meow@9", "ink@3", "react"];

const DEV_DEPENDENCIES: [&str; 7] = [
    "xo@0.39.1",
    "ava",
    "ink-testing-library",
    "chalk@4",
    "eslint-config-xo-react",
    "eslint-plugin-react",
    "eslint-plugin-react-hooks",
];

fn runtime_extras(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::JavaScript => &["import-jsx"],
        Variant::TypeScript => &[],
    }
}

fn dev_extras(variant: Variant) -> &'static [&'static str] {
    match variant {
        Variant::JavaScript => &[
            "@ava/babel",
            "@babel/preset-env",
            "@babel/preset-react",
            "@babel/register",
        ],
        Variant::TypeScript => &[
            "@ava/typescript",
            "@sindresorhus/tsconfig",
            "@types/react",
            "typescript",
        ],
    }
}

/// Argv for the runtime-dependency install. Empty dependency names are
/// filtered out rather than passed to the installer.
pub fn runtime_install_args(variant: Variant) -> Vec<String> {
    let mut args = vec!["install".to_owned()];
    args.extend(dependency_names(&RUNTIME_DEPENDENCIES, runtime_extras(variant)));
    args
}

/// Argv for the dev-dependency install.
pub fn dev_install_args(variant: Variant) -> Vec<String> {
    let mut args = vec!["install".to_owned(), "--save-dev".to_owned()];
    args.extend(dependency_names(&DEV_DEPENDENCIES, dev_extras(variant)));
    args
}

fn dependency_names(common: &[&str], extras: &[&str]) -> Vec<String> {
    common
        .iter()
        .chain(extras)
        .filter(|name| !name.is_empty())
        .map(|name| (*name).to_owned())
        .collect()
}

/// The package-manager boundary. Every invocation runs in the target
/// directory; the program path is a field so tests can substitute a stub.
#[derive(Clone, Debug)]
pub struct Npm {
    program: String,
    project_dir: Utf8PathBuf,
}

impl Npm {
    pub fn new(project_dir: &Utf8Path) -> Self {
        Self::with_program("npm", project_dir)
    }

    pub fn with_program(program: impl Into<String>, project_dir: &Utf8Path) -> Self {
        Npm {
            program: program.into(),
            project_dir: project_dir.to_owned(),
        }
    }

    pub fn install_runtime_dependencies(&self, variant: Variant) -> Result<()> {
        self.run(&runtime_install_args(variant))
    }

    pub fn install_dev_dependencies(&self, variant: Variant) -> Result<()> {
        self.run(&dev_install_args(variant))
    }

    /// `npm run build` — required before linking the TypeScript variant.
    pub fn build(&self) -> Result<()> {
        self.run(&["run".to_owned(), "build".to_owned()])
    }

    pub fn link(&self) -> Result<()> {
        self.run(&["link".to_owned()])
    }

    fn run(&self, args: &[String]) -> Result<()> {
        let render = format_command(&self.program, args);
        debug!(command = %render, dir = %self.project_dir, "running");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(self.project_dir.as_std_path())
            .output()
            .with_context(|| format!("executing `{}`", render))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "`{}` failed with exit code {:?}: {}",
                render,
                output.status.code(),
                stderr.trim()
            );
        }
        Ok(())
    }
}

fn format_command(program: &str, args: &[String]) -> String {
    std::iter::once(program.to_owned())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_install_pins_compatibility_sensitive_packages() {
        let args = runtime_install_args(Variant::JavaScript);
        assert_eq!(args, vec!["install", "meow@9", "ink@3", "react", "import-jsx"]);
    }

    #[test]
    fn typescript_runtime_install_has_no_extras() {
        let args = runtime_install_args(Variant::TypeScript);
        assert_eq!(args, vec!["install", "meow@9", "ink@3", "react"]);
    }

    #[test]
    fn dev_install_is_save_dev_with_variant_toolchain() {
        let args = dev_install_args(Variant::TypeScript);
        assert_eq!(args[..2], ["install", "--save-dev"]);
        assert!(args.contains(&"typescript".to_owned()));
        assert!(args.contains(&"@sindresorhus/tsconfig".to_owned()));
        assert!(!args.contains(&"@babel/register".to_owned()));
    }

    #[test]
    fn empty_dependency_names_are_filtered() {
        let names = dependency_names(&["ink@3", ""], &["", "react"]);
        assert_eq!(names, vec!["ink@3", "react"]);
    }

    #[cfg(unix)]
    #[test]
    fn failed_invocation_surfaces_stderr() {
        use camino::Utf8PathBuf;
        use std::fs;
        use std::os::unix::fs::PermissionsExt;
        use std::time::{SystemTime, UNIX_EPOCH};

        let mut dir = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("create-ink-app-test-{ts}"));
        fs::create_dir_all(&dir).unwrap();
        let dir = Utf8PathBuf::from_path_buf(dir).unwrap();

        let stub = dir.join("npm");
        fs::write(
            stub.as_std_path(),
            "#!/bin/sh\necho 'registry unreachable' >&2\nexit 1\n",
        )
        .unwrap();
        fs::set_permissions(stub.as_std_path(), fs::Permissions::from_mode(0o755)).unwrap();

        let npm = Npm::with_program(stub.as_str(), &dir);
        let err = npm.link().unwrap_err();
        assert!(err.to_string().contains("registry unreachable"));

        let _ = fs::remove_dir_all(dir.as_std_path());
    }
}
