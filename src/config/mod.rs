//! Project configuration management for `sitemap.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── info       # [site]
//! │   ├── routes     # [routes]
//! │   ├── catalogue  # [[catalogue]]
//! │   └── output     # [sitemap], [robots], [build]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section          | Purpose                                        |
//! |------------------|------------------------------------------------|
//! | `[site]`         | Site name and default site URL                 |
//! | `[routes]`       | Explicit route list, route file, baseline set  |
//! | `[[catalogue]]`  | Content catalogues that derive routes          |
//! | `[sitemap]`      | Sitemap output                                 |
//! | `[robots]`       | robots.txt output                              |
//! | `[build]`        | Output/staging directories, minification      |
//!
//! A missing config file is not an error: every section has defaults and
//! the site URL may come from the environment alone.

pub mod section;
pub mod types;
mod util;

pub use util::find_config_file;

pub use section::{
    BuildConfig, CatalogueConfig, DEFAULT_BASELINE_ROUTES, RobotsConfig, RoutesConfig,
    SiteInfoConfig, SitemapConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{Cli, Commands, GenerateArgs},
    debug, log,
    utils::path::{normalize_path, resolve_in_root},
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config filename
pub const CONFIG_FILE: &str = "sitemap.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing sitemap.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Whether the config file was found on disk (internal use only)
    #[serde(skip)]
    pub config_found: bool,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site information
    #[serde(default)]
    pub site: SiteInfoConfig,

    /// Route sources
    #[serde(default)]
    pub routes: RoutesConfig,

    /// Content catalogues
    #[serde(default = "default_catalogues", rename = "catalogue")]
    pub catalogues: Vec<CatalogueConfig>,

    /// Sitemap output
    #[serde(default)]
    pub sitemap: SitemapConfig,

    /// robots.txt output
    #[serde(default)]
    pub robots: RobotsConfig,

    /// Build directories
    #[serde(default)]
    pub build: BuildConfig,
}

fn default_catalogues() -> Vec<CatalogueConfig> {
    vec![CatalogueConfig::default()]
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            config_path: PathBuf::new(),
            config_found: false,
            root: PathBuf::new(),
            site: SiteInfoConfig::default(),
            routes: RoutesConfig::default(),
            catalogues: default_catalogues(),
            sitemap: SitemapConfig::default(),
            robots: RobotsConfig::default(),
            build: BuildConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root is
    /// the config file's parent directory, or cwd when no file exists.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// Load configuration, searching for the config file from `start`.
    pub fn load_from(cli: &Cli, start: &Path) -> Result<Self> {
        let found = find_config_file(start, &cli.config);

        let (mut config, config_path, root) = match found {
            Some(path) => {
                let config = Self::from_path(&path)?;
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| start.to_path_buf());
                (config, path, root)
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                (Self::default(), start.join(&cli.config), start.to_path_buf())
            }
        };

        config.config_found = config_path.exists();
        config.config_path = config_path;
        config.apply_command_options(cli);
        config.normalize_paths(&root);
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    pub(crate) fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    ///
    /// This tool runs unattended in build pipelines, so unknown fields are
    /// reported and ignored rather than prompting.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring: {}", display_path, fields.join(", "));
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = path.to_path_buf();
    }

    /// Get path relative to the project root
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    /// Absolute path of the sitemap file.
    pub fn sitemap_path(&self) -> PathBuf {
        self.build.output.join(&self.sitemap.path)
    }

    /// Absolute path of the robots file.
    pub fn robots_path(&self) -> PathBuf {
        self.build.output.join(&self.robots.path)
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        match &cli.command {
            Commands::Generate { args } => self.apply_generate_args(args),
            Commands::Routes { .. } | Commands::Init { .. } => {}
        }
    }

    /// Apply generate arguments from CLI.
    ///
    /// `--site-url` is not folded into `[site] url`: it outranks the
    /// environment, while the config value ranks below it.
    fn apply_generate_args(&mut self, args: &GenerateArgs) {
        Self::update_option(&mut self.build.minify, args.minify.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize all paths relative to root directory.
    ///
    /// `sitemap.path` and `robots.path` stay relative; they are resolved
    /// against the output directory at write time.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.set_root(&root);

        self.build.output = resolve_in_root(&self.build.output, &root);
        self.build.staging = resolve_in_root(&self.build.staging, &root);

        if let Some(file) = self.routes.file.take() {
            self.routes.file = Some(resolve_in_root(&file, &root));
        }

        for catalogue in &mut self.catalogues {
            catalogue.candidates = catalogue
                .candidates
                .iter()
                .map(|c| resolve_in_root(c, &root))
                .collect();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        if self.root.as_os_str().is_empty() {
            bail!(ConfigError::Validation("project root is not set".into()));
        }

        self.routes.validate(&mut diag);
        for catalogue in &self.catalogues {
            catalogue.validate(&mut diag);
        }
        self.sitemap.validate(&mut diag);
        self.robots.validate(&mut diag);
        self.build.validate(&self.root, &mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config and finalize it against `root` without touching the cwd.
/// Panics if there are unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_config_in(root: &Path, content: &str) -> SiteConfig {
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.normalize_paths(root);
    parsed
}

// ============================================================================
// tests
// ============================================================================
