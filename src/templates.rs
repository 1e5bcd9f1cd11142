use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::Utf8Path;
use rust_embed::RustEmbed;

/// Placeholder token replaced with the package name in templated files.
pub const NAME_PLACEHOLDER: &str = "%NAME%";

#[derive(RustEmbed)]
#[folder = "templates"]
struct Templates;

pub fn get_bytes(path: &str) -> Result<Vec<u8>> {
    let file =
        Templates::get(path).ok_or_else(|| anyhow!("embedded template `{}` missing", path))?;
    Ok(file.data.as_ref().to_vec())
}

pub fn get_string(path: &str) -> Result<String> {
    let bytes = get_bytes(path)?;
    std::str::from_utf8(&bytes)
        .with_context(|| format!("decoding embedded template `{}`", path))
        .map(|value| value.to_owned())
}

/// Render a template's text with every literal `%NAME%` replaced by
/// `package_name`. No other content changes.
pub fn render(template: &str, package_name: &str) -> Result<String> {
    let source = get_string(template)?;
    Ok(source.replace(NAME_PLACEHOLDER, package_name))
}

pub fn write_to(destination: &Utf8Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = destination.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating directory {}", parent))?;
    }
    fs::write(destination, bytes).with_context(|| format!("writing {}", destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_template_is_an_error() {
        let err = get_bytes("no/such/template").unwrap_err();
        assert!(err.to_string().contains("no/such/template"));
    }

    #[test]
    fn render_replaces_every_placeholder() {
        let rendered = render("common/readme.md", "demo-app").unwrap();
        assert!(!rendered.contains(NAME_PLACEHOLDER));
        assert!(rendered.contains("demo-app"));
    }

    #[test]
    fn render_is_deterministic() {
        let first = render("js/_package.json", "demo-app").unwrap();
        let second = render("js/_package.json", "demo-app").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn rendered_manifest_is_valid_json_with_package_name() {
        let rendered = render("js/_package.json", "my-cool-app").unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["name"], "my-cool-app");
    }

    #[test]
    fn typescript_manifest_has_a_build_script() {
        let rendered = render("ts/_package.json", "typed-app").unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["scripts"]["build"], "tsc");
    }
}
