//! Site base URL resolution.
//!
//! Sources, highest priority first:
//!
//! 1. `--site-url` on the command line
//! 2. `SITE_URL`, `VITE_SITE_URL`, `PUBLIC_SITE_URL` (process env or `.env`)
//! 3. `[site] url` in `sitemap.toml`
//!
//! Blank values are skipped. When nothing is left the run cannot continue.

use std::fmt;

use url::Url;

use crate::config::{ConfigError, SiteInfoConfig};
use crate::core::Environment;

/// Environment variables consulted for the site URL, in priority order.
pub const SITE_URL_ENV_VARS: [&str; 3] = ["SITE_URL", "VITE_SITE_URL", "PUBLIC_SITE_URL"];

/// Where the site URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteUrlOrigin {
    Cli,
    Env(&'static str),
    Config,
}

impl fmt::Display for SiteUrlOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cli => f.write_str("--site-url"),
            Self::Env(name) => write!(f, "env {name}"),
            Self::Config => f.write_str(SiteInfoConfig::URL.as_str()),
        }
    }
}

/// Absolute site base URL without a trailing slash.
#[derive(Debug, Clone)]
pub struct SiteUrl {
    base: String,
    /// `base` with a trailing slash, so relative joins keep any path prefix.
    dir: Url,
    origin: SiteUrlOrigin,
}

impl SiteUrl {
    /// Resolve the site URL from all sources.
    pub fn resolve(
        cli: Option<&str>,
        env: &Environment,
        site: &SiteInfoConfig,
    ) -> Result<Self, ConfigError> {
        let candidates = std::iter::once((SiteUrlOrigin::Cli, cli))
            .chain(
                SITE_URL_ENV_VARS
                    .iter()
                    .map(|&name| (SiteUrlOrigin::Env(name), env.var(name))),
            )
            .chain(std::iter::once((SiteUrlOrigin::Config, site.url.as_deref())));

        for (origin, value) in candidates {
            if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
                return Self::parse(value, origin);
            }
        }

        Err(ConfigError::MissingSiteUrl {
            tried: Self::sources().join(", "),
        })
    }

    /// Every source name, in priority order.
    pub fn sources() -> Vec<String> {
        std::iter::once(SiteUrlOrigin::Cli.to_string())
            .chain(SITE_URL_ENV_VARS.iter().map(|name| (*name).to_string()))
            .chain(std::iter::once(SiteUrlOrigin::Config.to_string()))
            .collect()
    }

    /// Parse a raw value, requiring an absolute http(s) URL with a host.
    pub fn parse(raw: &str, origin: SiteUrlOrigin) -> Result<Self, ConfigError> {
        let base = raw.trim().trim_end_matches('/').to_string();
        let invalid = |reason: String| ConfigError::InvalidSiteUrl {
            url: raw.to_string(),
            origin: origin.to_string(),
            reason,
        };

        let dir = Url::parse(&format!("{base}/")).map_err(|e| invalid(e.to_string()))?;
        if !matches!(dir.scheme(), "http" | "https") {
            return Err(invalid(format!("scheme '{}' not supported", dir.scheme())));
        }
        if dir.host_str().is_none_or(str::is_empty) {
            return Err(invalid("URL must have a host".into()));
        }

        Ok(Self { base, dir, origin })
    }

    /// Base URL without trailing slash.
    pub fn as_str(&self) -> &str {
        &self.base
    }

    pub const fn origin(&self) -> SiteUrlOrigin {
        self.origin
    }

    /// Absolute URL for a path or override.
    ///
    /// Values that parse as absolute URLs with a host are used as-is;
    /// anything else is resolved below the base URL.
    pub fn join(&self, path: &str) -> String {
        if let Some(absolute) = Url::parse(path).ok().filter(Url::has_host) {
            return absolute.to_string();
        }

        // `./` keeps a first segment like `rpl:guide` from parsing as a scheme
        self.dir
            .join(&format!("./{}", path.trim_start_matches('/')))
            .map(String::from)
            .unwrap_or_else(|_| format!("{}/{}", self.base, path.trim_start_matches('/')))
    }
}

impl fmt::Display for SiteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}
