//! robots.txt generation.
//!
//! ```text
//! User-agent: *
//! Allow: /
//! Disallow: /admin
//! Sitemap: https://example.com/sitemap.xml
//! ```
//!
//! An existing robots.txt is hand-maintained and never touched.

use std::path::Path;

use crate::config::SiteConfig;
use crate::core::SiteUrl;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robots {
    disallow: Vec<String>,
    sitemap_url: String,
}

impl Robots {
    pub fn build(config: &SiteConfig, site_url: &SiteUrl) -> Self {
        Self {
            disallow: config
                .robots
                .disallow
                .iter()
                .map(|d| d.trim())
                .filter(|d| !d.is_empty())
                .map(str::to_string)
                .collect(),
            sitemap_url: site_url.join(&config.sitemap.path.to_string_lossy()),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("User-agent: *\nAllow: /\n");
        for path in &self.disallow {
            out.push_str("Disallow: ");
            out.push_str(path);
            out.push('\n');
        }
        out.push_str("Sitemap: ");
        out.push_str(&self.sitemap_url);
        out.push('\n');
        out
    }
}

/// Whether a robots file should be written at `path`.
pub fn should_write(path: &Path) -> bool {
    !path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config_in;
    use crate::core::SiteUrlOrigin;
    use std::fs;
    use tempfile::TempDir;

    fn site_url(raw: &str) -> SiteUrl {
        SiteUrl::parse(raw, SiteUrlOrigin::Config).unwrap()
    }

    #[test]
    fn test_render_default() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(dir.path(), "");
        let robots = Robots::build(&config, &site_url("https://example.com/"));

        assert_eq!(
            robots.render(),
            "User-agent: *\nAllow: /\nSitemap: https://example.com/sitemap.xml\n"
        );
    }

    #[test]
    fn test_render_disallow_and_custom_sitemap_path() {
        let dir = TempDir::new().unwrap();
        let config = test_config_in(
            dir.path(),
            "[sitemap]\npath = \"maps/sitemap.xml\"\n\n[robots]\ndisallow = [\"/admin\", \" \", \"/drafts\"]",
        );
        let robots = Robots::build(&config, &site_url("https://example.com/rpl"));

        assert_eq!(
            robots.render(),
            "User-agent: *\n\
             Allow: /\n\
             Disallow: /admin\n\
             Disallow: /drafts\n\
             Sitemap: https://example.com/rpl/maps/sitemap.xml\n"
        );
    }

    #[test]
    fn test_should_write_only_when_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("robots.txt");
        assert!(should_write(&path));

        fs::write(&path, "User-agent: *\nDisallow: /\n").unwrap();
        assert!(!should_write(&path));
    }
}
