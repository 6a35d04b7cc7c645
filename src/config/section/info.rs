//! `[site]` configuration.
//!
//! Basic site information. `url` is the lowest-priority source for the
//! site base URL; `--site-url` and the `SITE_URL` family of environment
//! variables take precedence. It is checked only when it is the source
//! actually chosen, so an unused or malformed value never blocks a run.

use crate::config::FieldPath;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site name, shown in logs only.
    pub name: String,

    /// Default site URL (e.g., "https://example.com").
    pub url: Option<String>,
}

impl SiteInfoConfig {
    pub const URL: FieldPath = FieldPath::new("site.url");
}
