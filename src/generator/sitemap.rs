//! Sitemap generation.
//!
//! Generates a sitemap.xml file listing every resolved route for search
//! engine indexing.
//!
//! # Sitemap Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url>
//!     <loc>https://example.com/</loc>
//!     <lastmod>2025-01-01</lastmod>
//!     <changefreq>daily</changefreq>
//!     <priority>1.0</priority>
//!   </url>
//! </urlset>
//! ```
//!
//! The root route is marked `daily` / `1.0`, every other route
//! `weekly` / `0.8`. All entries share the run date as `lastmod`.

use crate::{core::Route, core::SiteUrl, routes::ResolvedRoutes};
use crate::utils::date::DateUtc;
use std::borrow::Cow;
use std::fmt;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
}

impl ChangeFreq {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

impl fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    pub loc: String,
    pub lastmod: DateUtc,
    pub changefreq: ChangeFreq,
    /// Always one decimal place when rendered.
    pub priority: f32,
}

impl UrlEntry {
    pub fn for_route(route: &Route, site_url: &SiteUrl, lastmod: DateUtc) -> Self {
        let (changefreq, priority) = if route.is_root() {
            (ChangeFreq::Daily, 1.0)
        } else {
            (ChangeFreq::Weekly, 0.8)
        };

        Self {
            loc: site_url.join(route.as_str()),
            lastmod,
            changefreq,
            priority,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Sitemap {
    urls: Vec<UrlEntry>,
}

impl Sitemap {
    /// One entry per route, in route order.
    pub fn build(routes: &ResolvedRoutes, site_url: &SiteUrl, today: DateUtc) -> Self {
        let urls = routes
            .routes
            .iter()
            .map(|route| UrlEntry::for_route(route, site_url, today))
            .collect();
        Self { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn into_xml(self) -> String {
        let mut xml = String::with_capacity(256 + self.urls.len() * 160);

        xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str("<urlset xmlns=\"");
        xml.push_str(SITEMAP_NS);
        xml.push_str("\">\n");

        for entry in self.urls {
            xml.push_str("  <url>\n    <loc>");
            xml.push_str(&escape_xml(&entry.loc));
            xml.push_str("</loc>\n    <lastmod>");
            xml.push_str(&entry.lastmod.to_iso_date());
            xml.push_str("</lastmod>\n    <changefreq>");
            xml.push_str(entry.changefreq.as_str());
            xml.push_str("</changefreq>\n    <priority>");
            xml.push_str(&format!("{:.1}", entry.priority));
            xml.push_str("</priority>\n  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }

    /// Final file content, minified if requested.
    pub fn render(self, minify: bool) -> Vec<u8> {
        let xml = self.into_xml();
        if minify {
            self::minify(&xml).into_bytes()
        } else {
            xml.into_bytes()
        }
    }
}

/// Join lines with surrounding whitespace dropped.
///
/// Only safe for markup like ours where no text node spans lines.
fn minify(xml: &str) -> String {
    xml.lines().map(str::trim).collect()
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> Cow<'_, str> {
    // Fast path: check if escaping is needed
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(s);
    }

    Cow::Owned(
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&apos;"),
    )
}
