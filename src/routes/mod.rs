//! Route discovery.
//!
//! Exactly one source supplies the route list on each run, tried in order:
//!
//! ```text
//! explicit ([routes] explicit + [routes] file)
//!     │ empty
//!     ▼
//! catalogue (baseline ∪ routes derived from [[catalogue]] files)
//!     │ nothing derived
//!     ▼
//! baseline ([routes] baseline)
//! ```
//!
//! Resolution never fails. Missing or malformed inputs are logged as
//! warnings and the next source is tried; the baseline always contains
//! at least the root route.

pub mod catalogue;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{RoutesConfig, SiteConfig};
use crate::core::{Route, normalize_routes};
use crate::{debug, log};

/// Errors reading a route or catalogue data file.
///
/// These never abort a run; callers log them and fall back.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to read `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("invalid TOML in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("unsupported file type `{0}`, expected .toml or .json")]
    Unsupported(PathBuf),
}

/// Data file formats, richest typed format first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataFormat {
    Toml,
    Json,
}

impl DataFormat {
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(SourceError::Unsupported(path.to_path_buf())),
        }
    }
}

/// Read a data file, returning its format and content.
pub(crate) fn read_data_file(path: &Path) -> Result<(DataFormat, String), SourceError> {
    let format = DataFormat::from_path(path)?;
    let content =
        fs::read_to_string(path).map_err(|e| SourceError::Io(path.to_path_buf(), e))?;
    Ok((format, content))
}

// ============================================================================
// Route source
// ============================================================================

/// Which source produced the route list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
    Explicit,
    Catalogue,
    Baseline,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Explicit => "explicit",
            Self::Catalogue => "catalogue",
            Self::Baseline => "baseline",
        })
    }
}

/// Normalized, ordered route list and the source it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedRoutes {
    pub source: RouteSource,
    pub routes: Vec<Route>,
}

impl ResolvedRoutes {
    pub fn new<I, S>(source: RouteSource, raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            source,
            routes: normalize_routes(raw),
        }
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Resolve the route list for this run.
pub fn resolve_routes(config: &SiteConfig) -> ResolvedRoutes {
    let explicit = explicit_routes(&config.routes);
    if !explicit.is_empty() {
        let resolved = ResolvedRoutes::new(RouteSource::Explicit, &explicit);
        log!("routes"; "using {} explicit route(s)", resolved.len());
        return resolved;
    }

    log!("warning"; "no explicit routes configured, deriving routes from catalogues");
    let derived = catalogue::derive_routes(&config.catalogues);

    let source = if derived.is_empty() {
        log!("warning"; "no catalogue routes found, using baseline routes only");
        RouteSource::Baseline
    } else {
        RouteSource::Catalogue
    };

    let resolved = ResolvedRoutes::new(
        source,
        config.routes.baseline.iter().map(String::as_str).chain(derived.iter().map(String::as_str)),
    );
    log!("routes"; "using {} route(s) from {}", resolved.len(), resolved.source);
    resolved
}

// ============================================================================
// Explicit routes
// ============================================================================

/// TOML route file: `routes = ["/", "/faq"]`.
#[derive(Debug, Default, Deserialize)]
struct RouteFile {
    #[serde(default)]
    routes: Vec<String>,
}

/// Inline explicit routes plus those from `[routes] file`.
///
/// A broken route file is reported and contributes nothing.
pub fn explicit_routes(config: &RoutesConfig) -> Vec<String> {
    let mut routes = config.explicit.clone();

    if let Some(path) = &config.file {
        match load_route_file(path) {
            Ok(from_file) => {
                debug!("routes"; "{} route(s) from {}", from_file.len(), path.display());
                if from_file.is_empty() {
                    log!("warning"; "route file {} is empty", path.display());
                }
                routes.extend(from_file);
            }
            Err(e) => {
                log!("warning"; "{}, ignoring route file", error_chain(&e));
            }
        }
    }

    routes
}

/// Load a list of route strings from a JSON array or TOML `routes = [...]`.
pub fn load_route_file(path: &Path) -> Result<Vec<String>, SourceError> {
    let (format, content) = read_data_file(path)?;
    match format {
        DataFormat::Toml => toml::from_str::<RouteFile>(&content)
            .map(|file| file.routes)
            .map_err(|e| SourceError::Toml(path.to_path_buf(), e)),
        DataFormat::Json => serde_json::from_str::<Vec<String>>(&content)
            .map_err(|e| SourceError::Json(path.to_path_buf(), e)),
    }
}

/// Render an error with its sources, `a: b: c`.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
