//! `[sitemap]`, `[robots]` and `[build]` configuration.
//!
//! # Example
//!
//! ```toml
//! [sitemap]
//! enable = true
//! path = "sitemap.xml"        # Relative to the output directory
//!
//! [robots]
//! enable = true
//! path = "robots.txt"         # Written only if absent
//! disallow = ["/booking"]
//!
//! [build]
//! output = "dist"             # Relative to the project root
//! staging = ".sitemap-tmp"    # Scratch space, cleaned after each run
//! minify = false
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Enable sitemap generation.
    pub enable: bool,
    /// Output path for sitemap file.
    pub path: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "sitemap.xml".into(),
        }
    }
}

impl SitemapConfig {
    pub const PATH: FieldPath = FieldPath::new("sitemap.path");
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RobotsConfig {
    /// Write robots.txt when it does not exist yet.
    pub enable: bool,
    /// Output path for robots file.
    pub path: PathBuf,
    /// Extra `Disallow:` rules.
    pub disallow: Vec<String>,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "robots.txt".into(),
            disallow: Vec::new(),
        }
    }
}

impl RobotsConfig {
    pub const PATH: FieldPath = FieldPath::new("robots.path");
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build output directory.
    pub output: PathBuf,
    /// Staging directory for in-progress writes.
    pub staging: PathBuf,
    /// Collapse the sitemap onto a single line.
    pub minify: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output: "dist".into(),
            staging: ".sitemap-tmp".into(),
            minify: false,
        }
    }
}

impl BuildConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");
    pub const STAGING: FieldPath = FieldPath::new("build.staging");

    /// Validate normalized (absolute) build paths.
    ///
    /// Scratch runs are created inside the staging directory, so it must
    /// not be the project root or contain the output directory.
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.staging == root || root.starts_with(&self.staging) {
            diag.error(
                Self::STAGING,
                format!("`{}` is the project root or above it", self.staging.display()),
            );
        } else if self.output.starts_with(&self.staging) {
            diag.error_with_hint(
                Self::STAGING,
                format!(
                    "`{}` contains the output directory `{}`",
                    self.staging.display(),
                    self.output.display()
                ),
                "use a dedicated directory such as \".sitemap-tmp\"",
            );
        }
    }
}

/// Check that an output file path is a plain relative path inside the
/// output directory.
pub(crate) fn validate_output_file(path: &Path, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if path.as_os_str().is_empty() {
        diag.error(field, "path must not be empty");
        return;
    }
    let escapes = path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        diag.error_with_hint(
            field,
            format!("`{}` must stay inside the output directory", path.display()),
            "use a relative path without `..`",
        );
    }
}

impl SitemapConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_output_file(&self.path, Self::PATH, diag);
    }
}

impl RobotsConfig {
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_output_file(&self.path, Self::PATH, diag);
    }
}
