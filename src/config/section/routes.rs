//! `[routes]` configuration.
//!
//! # Example
//!
//! ```toml
//! [routes]
//! explicit = ["/", "/faq"]          # Preferred source; wins when non-empty
//! file = "config/routes.json"       # Extra explicit routes (JSON array or TOML `routes = [...]`)
//! baseline = ["/", "/privacy"]      # Fallback set, always merged with catalogue routes
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Non-dynamic routes used when no explicit list is configured.
pub const DEFAULT_BASELINE_ROUTES: &[&str] = &[
    "/",
    "/privacy",
    "/faq",
    "/terms",
    "/contact",
    "/whats-rpl",
    "/refunds",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Explicit route list.
    pub explicit: Vec<String>,

    /// File holding additional explicit routes.
    pub file: Option<PathBuf>,

    /// Baseline routes, the single definition of the fallback set.
    pub baseline: Vec<String>,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            explicit: Vec::new(),
            file: None,
            baseline: DEFAULT_BASELINE_ROUTES
                .iter()
                .map(|r| (*r).to_string())
                .collect(),
        }
    }
}

impl RoutesConfig {
    pub const FILE: FieldPath = FieldPath::new("routes.file");
    pub const BASELINE: FieldPath = FieldPath::new("routes.baseline");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(file) = &self.file
            && !matches!(
                file.extension().and_then(|e| e.to_str()),
                Some("json" | "toml")
            )
        {
            diag.error_with_hint(
                Self::FILE,
                format!("unsupported route file `{}`", file.display()),
                "use a .json array or a .toml file with `routes = [...]`",
            );
        }

        // Root is added during normalization anyway; an empty baseline is
        // almost certainly a mistake.
        if self.baseline.iter().all(|r| r.trim().is_empty()) {
            diag.warn(Self::BASELINE, "baseline is empty, only `/` will be used as fallback");
        }
    }
}
