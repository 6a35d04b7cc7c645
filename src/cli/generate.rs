//! Sitemap generation orchestration.
//!
//! Phases:
//! - **Site URL** - Resolve the base URL; fatal before anything is written
//! - **Routes** - Explicit, catalogue or baseline route list
//! - **Render** - sitemap.xml and robots.txt content
//! - **Write** - Stage, then move into the output directory
//! - **Cleanup** - Remove the staging directory

use std::path::PathBuf;

use anyhow::Result;

use crate::{
    cli::GenerateArgs,
    config::SiteConfig,
    core::{Environment, SiteUrl},
    debug,
    generator::{
        robots::{self, Robots},
        sitemap::Sitemap,
        staging::StagingDir,
    },
    log,
    routes::{ResolvedRoutes, resolve_routes},
};

/// What happened to robots.txt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RobotsOutcome {
    Written(PathBuf),
    /// Already present, left untouched.
    Kept(PathBuf),
    /// Would be written; dry run only.
    Preview(PathBuf),
    Disabled,
}

/// Summary of a generate run.
#[derive(Debug)]
pub struct GenerateReport {
    pub site_url: SiteUrl,
    pub routes: ResolvedRoutes,
    /// `None` when the sitemap is disabled or in dry-run mode.
    pub sitemap: Option<PathBuf>,
    pub robots: RobotsOutcome,
}

/// Generate sitemap.xml and, when missing, robots.txt.
pub fn generate(
    config: &SiteConfig,
    env: &Environment,
    args: &GenerateArgs,
) -> Result<GenerateReport> {
    let site_url = SiteUrl::resolve(args.site_url.as_deref(), env, &config.site)?;
    log!("site"; "{} (from {})", site_url, site_url.origin());

    let routes = resolve_routes(config);
    let sitemap = Sitemap::build(&routes, &site_url, env.today());
    let robots = Robots::build(config, &site_url);
    debug!("sitemap"; "{} url(s), lastmod {}", sitemap.len(), env.today());

    if args.dry_run {
        let robots = preview(config, sitemap, &robots);
        return Ok(GenerateReport {
            site_url,
            routes,
            sitemap: None,
            robots,
        });
    }

    let staging = StagingDir::create(&config.build.staging)?;
    let sitemap_path = write_sitemap(config, &staging, sitemap)?;
    let robots_outcome = write_robots(config, &staging, &robots)?;

    if let Err(e) = staging.cleanup() {
        log!("warning"; "{:#}", e);
    }

    Ok(GenerateReport {
        site_url,
        routes,
        sitemap: sitemap_path,
        robots: robots_outcome,
    })
}

fn write_sitemap(
    config: &SiteConfig,
    staging: &StagingDir,
    sitemap: Sitemap,
) -> Result<Option<PathBuf>> {
    if !config.sitemap.enable {
        debug!("sitemap"; "disabled");
        return Ok(None);
    }

    let count = sitemap.len();
    let dest = config.sitemap_path();
    let staged = staging.write(&config.sitemap.path, &sitemap.render(config.build.minify))?;
    staging.publish(&staged, &dest)?;

    log!("sitemap"; "{} ({} url(s))", config.root_relative(&dest).display(), count);
    Ok(Some(dest))
}

fn write_robots(
    config: &SiteConfig,
    staging: &StagingDir,
    robots: &Robots,
) -> Result<RobotsOutcome> {
    if !config.robots.enable {
        debug!("robots"; "disabled");
        return Ok(RobotsOutcome::Disabled);
    }

    let dest = config.robots_path();
    if !robots::should_write(&dest) {
        debug!("robots"; "{} exists, leaving it alone", config.root_relative(&dest).display());
        return Ok(RobotsOutcome::Kept(dest));
    }

    let staged = staging.write(&config.robots.path, robots.render().as_bytes())?;
    staging.publish(&staged, &dest)?;

    log!("robots"; "{}", config.root_relative(&dest).display());
    Ok(RobotsOutcome::Written(dest))
}

/// Print what would be written, touching nothing on disk.
fn preview(config: &SiteConfig, sitemap: Sitemap, robots: &Robots) -> RobotsOutcome {
    if config.sitemap.enable {
        let xml = sitemap.render(config.build.minify);
        print!("{}", String::from_utf8_lossy(&xml));
    }

    if !config.robots.enable {
        return RobotsOutcome::Disabled;
    }

    let dest = config.robots_path();
    if robots::should_write(&dest) {
        log!("robots"; "would write {}:", config.root_relative(&dest).display());
        print!("{}", robots.render());
        RobotsOutcome::Preview(dest)
    } else {
        log!("robots"; "{} exists, would be kept", config.root_relative(&dest).display());
        RobotsOutcome::Kept(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, test_config_in};
    use crate::core::SiteUrlOrigin;
    use crate::routes::RouteSource;
    use crate::utils::date::DateUtc;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn env(vars: &[(&str, &str)]) -> Environment {
        Environment::from_vars(vars.iter().copied(), DateUtc::from_ymd(2025, 6, 30))
    }

    fn write_trades(root: &Path, json: &str) {
        fs::create_dir_all(root.join("src/data")).unwrap();
        fs::write(root.join("src/data/trades.json"), json).unwrap();
    }

    #[test]
    fn test_missing_site_url_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");

        let err = generate(&config, &env(&[]), &GenerateArgs::default()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::MissingSiteUrl { .. })
        ));
        assert!(!config.sitemap_path().exists());
        assert!(!config.robots_path().exists());
        assert!(!config.build.staging.exists());
    }

    #[test]
    fn test_invalid_site_url_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");
        let env = env(&[("SITE_URL", "not a url")]);

        let err = generate(&config, &env, &GenerateArgs::default()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::InvalidSiteUrl { .. })
        ));
        assert!(!config.sitemap_path().exists());
    }

    #[test]
    fn test_generate_from_catalogue() {
        let dir = TempDir::new().unwrap();
        write_trades(dir.path(), r#"[{"slug": "plumbing"}, {"slug": "carpentry"}]"#);
        let config = test_config_in(dir.path(), "");
        let env = env(&[("SITE_URL", "https://example.com")]);

        let report = generate(&config, &env, &GenerateArgs::default()).unwrap();

        assert_eq!(report.routes.source, RouteSource::Catalogue);
        assert_eq!(report.site_url.origin(), SiteUrlOrigin::Env("SITE_URL"));
        assert_eq!(report.sitemap.as_deref(), Some(config.sitemap_path().as_path()));

        let xml = fs::read_to_string(config.sitemap_path()).unwrap();
        assert!(xml.contains("<loc>https://example.com/services/plumbing</loc>"));
        assert!(xml.contains("<loc>https://example.com/services/carpentry</loc>"));
        assert!(xml.contains("<lastmod>2025-06-30</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 9);
        // Root first
        let first_loc = xml.find("<loc>").unwrap();
        assert!(xml[first_loc..].starts_with("<loc>https://example.com/</loc>"));

        assert_eq!(
            fs::read_to_string(config.robots_path()).unwrap(),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
        assert!(!config.build.staging.exists());
    }

    #[test]
    fn test_existing_robots_is_kept() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.robots_path(), "User-agent: *\nDisallow: /\n").unwrap();
        let env = env(&[("VITE_SITE_URL", "https://example.com")]);

        let report = generate(&config, &env, &GenerateArgs::default()).unwrap();

        assert_eq!(report.robots, RobotsOutcome::Kept(config.robots_path()));
        assert_eq!(
            fs::read_to_string(config.robots_path()).unwrap(),
            "User-agent: *\nDisallow: /\n"
        );
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "[routes]\nexplicit = [\"/faq\", \"/\"]");
        let env = env(&[("PUBLIC_SITE_URL", "https://example.com")]);

        let first = generate(&config, &env, &GenerateArgs::default()).unwrap();
        let sitemap_a = fs::read(config.sitemap_path()).unwrap();
        let robots_a = fs::read(config.robots_path()).unwrap();

        let second = generate(&config, &env, &GenerateArgs::default()).unwrap();
        let sitemap_b = fs::read(config.sitemap_path()).unwrap();
        let robots_b = fs::read(config.robots_path()).unwrap();

        assert!(matches!(first.robots, RobotsOutcome::Written(_)));
        assert!(matches!(second.robots, RobotsOutcome::Kept(_)));
        assert_eq!(sitemap_a, sitemap_b);
        assert_eq!(robots_a, robots_b);
    }

    #[test]
    fn test_sitemap_is_overwritten() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "[routes]\nexplicit = [\"/faq\"]");
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.sitemap_path(), "stale").unwrap();
        let env = env(&[("SITE_URL", "https://example.com")]);

        generate(&config, &env, &GenerateArgs::default()).unwrap();

        let xml = fs::read_to_string(config.sitemap_path()).unwrap();
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn test_cli_site_url_and_minify() {
        let dir = TempDir::new().unwrap();
        let mut config = test_config_in(dir.path(), "[site]\nurl = \"https://config.example\"");
        config.build.minify = true;
        let env = env(&[("SITE_URL", "https://env.example")]);
        let args = GenerateArgs {
            site_url: Some("https://cli.example/".into()),
            ..GenerateArgs::default()
        };

        let report = generate(&config, &env, &args).unwrap();

        assert_eq!(report.site_url.origin(), SiteUrlOrigin::Cli);
        let xml = fs::read_to_string(config.sitemap_path()).unwrap();
        assert!(xml.contains("<url><loc>https://cli.example/</loc>"));
        assert!(!xml.contains('\n'));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");
        let env = env(&[("SITE_URL", "https://example.com")]);
        let args = GenerateArgs {
            dry_run: true,
            ..GenerateArgs::default()
        };

        let report = generate(&config, &env, &args).unwrap();

        assert!(report.sitemap.is_none());
        assert_eq!(report.robots, RobotsOutcome::Preview(config.robots_path()));
        assert!(!config.build.output.exists());
        assert!(!config.build.staging.exists());
    }

    #[test]
    fn test_dry_run_reports_robots_decision() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");
        fs::create_dir_all(&config.build.output).unwrap();
        fs::write(config.robots_path(), "User-agent: *\n").unwrap();
        let env = env(&[("SITE_URL", "https://example.com")]);
        let args = GenerateArgs {
            dry_run: true,
            ..GenerateArgs::default()
        };

        let report = generate(&config, &env, &args).unwrap();
        assert_eq!(report.robots, RobotsOutcome::Kept(config.robots_path()));

        let config = test_config_in(dir.path(), "[robots]\nenable = false");
        let report = generate(&config, &env, &args).unwrap();
        assert_eq!(report.robots, RobotsOutcome::Disabled);
    }

    #[test]
    fn test_disabled_outputs() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(
            dir.path(),
            "[sitemap]\nenable = false\n\n[robots]\nenable = false",
        );
        let env = env(&[("SITE_URL", "https://example.com")]);

        let report = generate(&config, &env, &GenerateArgs::default()).unwrap();

        assert!(report.sitemap.is_none());
        assert_eq!(report.robots, RobotsOutcome::Disabled);
        assert!(!config.sitemap_path().exists());
        assert!(!config.robots_path().exists());
    }

    #[test]
    fn test_staging_removed_when_publish_fails() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");
        // A file where the output directory should be
        fs::write(&config.build.output, "not a dir").unwrap();
        let env = env(&[("SITE_URL", "https://example.com")]);

        assert!(generate(&config, &env, &GenerateArgs::default()).is_err());
        assert!(!config.build.staging.exists());
    }

    #[test]
    fn test_existing_staging_dir_survives() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.tsx"), "render(<App />)").unwrap();
        let config = test_config_in(dir.path(), "[build]\nstaging = \"src\"");
        let env = env(&[("SITE_URL", "https://example.com")]);

        generate(&config, &env, &GenerateArgs::default()).unwrap();

        assert!(config.sitemap_path().is_file());
        assert_eq!(
            fs::read_to_string(dir.path().join("src/main.tsx")).unwrap(),
            "render(<App />)"
        );
        assert_eq!(fs::read_dir(dir.path().join("src")).unwrap().count(), 1);
    }
}
