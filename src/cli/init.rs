//! Configuration file generation.
//!
//! Writes a commented `sitemap.toml` with every option at its default.

use anyhow::{Context, Result, bail};
use std::{fs, path::Path};

use crate::config::DEFAULT_BASELINE_ROUTES;
use crate::log;

/// Generate sitemap.toml content with comments
pub fn generate_config_template() -> String {
    let baseline = DEFAULT_BASELINE_ROUTES
        .iter()
        .map(|r| format!("\"{r}\""))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"# sitemapper configuration file (v{version})

[site]
# Used in log output only
name = ""
# Fallback base URL. --site-url, then SITE_URL, VITE_SITE_URL and
# PUBLIC_SITE_URL (process environment or .env) take precedence.
# url = "https://example.com"

[routes]
# Explicit routes. When this list (plus `file`) is non-empty,
# catalogues and the baseline are not consulted.
explicit = []
# Route list file: JSON array or TOML `routes = [...]`
# file = "src/data/routes.json"
# Always-present routes when deriving from catalogues
baseline = [{baseline}]

# Each catalogue turns record slugs into routes. The first existing
# candidate is read: TOML `[[entries]]` or a JSON array of objects.
[[catalogue]]
name = "trades"
template = "/services/{{slug}}"
candidates = ["src/data/trades.toml", "src/data/trades.json"]

[sitemap]
enable = true
# Relative to [build] output
path = "sitemap.xml"

[robots]
# Only written when the file does not exist yet
enable = true
path = "robots.txt"
disallow = []

[build]
output = "dist"
# Scratch directory; each run cleans up what it created here
staging = ".sitemap-tmp"
minify = false
"#,
        version = env!("CARGO_PKG_VERSION"),
    )
}

/// Write a default config to `config_name` under `root`.
///
/// If `dry_run` is true, only prints the template to stdout.
pub fn init_config(root: &Path, config_name: &Path, dry_run: bool) -> Result<()> {
    let content = generate_config_template();
    if dry_run {
        print!("{content}");
        return Ok(());
    }

    let path = root.join(config_name);
    if path.exists() {
        bail!(
            "'{}' already exists.\n\
             Remove it first or edit it directly.",
            path.display()
        );
    }

    fs::write(&path, content)
        .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

    log!("init"; "wrote {}", config_name.display());
    Ok(())
}
