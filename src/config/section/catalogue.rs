//! `[[catalogue]]` configuration.
//!
//! Each catalogue is a content list whose records contribute one route each.
//!
//! # Example
//!
//! ```toml
//! [[catalogue]]
//! name = "trades"
//! template = "/services/{slug}"
//! candidates = ["src/data/trades.toml", "src/data/trades.json"]
//!
//! [[catalogue]]
//! name = "qualifications"
//! template = "/qualifications/{slug}"
//! candidates = ["src/data/qualifications.json"]
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder substituted with each record's slug.
pub const SLUG_PLACEHOLDER: &str = "{slug}";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogueConfig {
    /// Catalogue name, used in logs.
    pub name: String,

    /// Route template containing `{slug}`.
    pub template: String,

    /// Candidate files, tried in order. The first existing one is used.
    pub candidates: Vec<PathBuf>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            name: "trades".into(),
            template: "/services/{slug}".into(),
            candidates: vec![
                "src/data/trades.toml".into(),
                "src/data/trades.json".into(),
            ],
        }
    }
}

impl CatalogueConfig {
    pub const TEMPLATE: FieldPath = FieldPath::new("catalogue.template");
    pub const CANDIDATES: FieldPath = FieldPath::new("catalogue.candidates");

    /// Route for a single slug.
    pub fn route_for(&self, slug: &str) -> String {
        self.template.replace(SLUG_PLACEHOLDER, slug)
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !self.template.contains(SLUG_PLACEHOLDER) {
            diag.error_with_hint(
                Self::TEMPLATE,
                format!("template of `{}` has no {SLUG_PLACEHOLDER} placeholder", self.name),
                "e.g. template = \"/services/{slug}\"",
            );
        }

        if self.candidates.is_empty() {
            diag.error(
                Self::CANDIDATES,
                format!("catalogue `{}` lists no candidate files", self.name),
            );
        }

        for candidate in &self.candidates {
            if !matches!(
                candidate.extension().and_then(|e| e.to_str()),
                Some("json" | "toml")
            ) {
                diag.error_with_hint(
                    Self::CANDIDATES,
                    format!("unsupported catalogue file `{}`", candidate.display()),
                    "catalogues must be .toml or .json",
                );
            }
        }
    }
}
