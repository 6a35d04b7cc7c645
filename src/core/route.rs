//! Route type for crawlable URL paths.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};

/// Public URL path of a page.
///
/// Invariants:
/// - Trimmed, never empty
/// - Starts with `/`, unless it is an absolute URL override
/// - No trailing slash except for the root route
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route(Arc<str>);

impl Route {
    pub const ROOT: &'static str = "/";

    pub fn root() -> Self {
        Self(Arc::from(Self::ROOT))
    }

    /// Normalize a raw route string.
    ///
    /// Blank input becomes the root route. Absolute URLs (with a host) are
    /// kept verbatim.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.is_empty() || trimmed == Self::ROOT {
            return Self::root();
        }

        if is_absolute_url(trimmed) {
            return Self(Arc::from(trimmed));
        }

        // Add leading slash if missing
        let with_leading = if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        let normalized = with_leading.trim_end_matches('/');
        if normalized.is_empty() {
            Self::root()
        } else {
            Self(Arc::from(normalized))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        &*self.0 == Self::ROOT
    }

    /// Whether this is an absolute URL override rather than a path.
    #[inline]
    pub fn is_absolute(&self) -> bool {
        !self.0.starts_with('/')
    }
}

fn is_absolute_url(s: &str) -> bool {
    url::Url::parse(s).is_ok_and(|u| u.has_host())
}

/// Root first, everything else lexicographically.
impl Ord for Route {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_root(), other.is_root()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for Route {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Route {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Normalize, deduplicate and order a raw route list.
///
/// The root route is always included and always first.
pub fn normalize_routes<I, S>(raw: I) -> Vec<Route>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut routes: Vec<Route> = raw
        .into_iter()
        .map(|r| Route::parse(r.as_ref()))
        .chain(std::iter::once(Route::root()))
        .collect();

    routes.sort();
    routes.dedup();
    routes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root_variants() {
        for raw in ["", "   ", "/", " / ", "//", "///"] {
            assert!(Route::parse(raw).is_root(), "{raw:?} should be root");
        }
    }

    #[test]
    fn test_parse_normalizes_slashes() {
        assert_eq!(Route::parse("faq").as_str(), "/faq");
        assert_eq!(Route::parse("/faq/").as_str(), "/faq");
        assert_eq!(Route::parse("  /services/carpentry  ").as_str(), "/services/carpentry");
        assert_eq!(Route::parse("services/plumbing/").as_str(), "/services/plumbing");
    }

    #[test]
    fn test_parse_keeps_absolute_urls() {
        let route = Route::parse(" https://partner.example.com/rpl ");
        assert!(route.is_absolute());
        assert_eq!(route.as_str(), "https://partner.example.com/rpl");

        // Scheme-like strings without a host are treated as paths
        let route = Route::parse("localhost:3000");
        assert!(!route.is_absolute());
        assert_eq!(route.as_str(), "/localhost:3000");
    }

    #[test]
    fn test_ordering_root_first() {
        let mut routes = vec![
            Route::parse("/faq"),
            Route::parse("https://partner.example.com"),
            Route::parse("/about"),
            Route::parse("/"),
            Route::parse("/FAQ"),
        ];
        routes.sort();
        let ordered: Vec<&str> = routes.iter().map(Route::as_str).collect();
        assert_eq!(
            ordered,
            vec!["/", "/FAQ", "/about", "/faq", "https://partner.example.com"]
        );
    }

    #[test]
    fn test_normalize_routes_dedups_and_adds_root() {
        let routes = normalize_routes(["/faq", " /faq ", "faq/", "/terms", "/faq"]);
        let ordered: Vec<&str> = routes.iter().map(Route::as_str).collect();
        assert_eq!(ordered, vec!["/", "/faq", "/terms"]);
    }

    #[test]
    fn test_normalize_routes_empty_entries_become_root() {
        let routes = normalize_routes(["", "  ", "/privacy"]);
        let ordered: Vec<&str> = routes.iter().map(Route::as_str).collect();
        assert_eq!(ordered, vec!["/", "/privacy"]);
    }

    #[test]
    fn test_normalize_routes_empty_input() {
        let routes = normalize_routes(Vec::<String>::new());
        assert_eq!(routes, vec![Route::root()]);
    }

    #[test]
    fn test_normalize_routes_no_duplicates_after_trim() {
        let raw = vec![" /a", "/a ", "/b", "/b/", "/", ""];
        let routes = normalize_routes(&raw);
        let mut seen = std::collections::HashSet::new();
        for route in &routes {
            assert!(seen.insert(route.as_str().trim()), "duplicate {route}");
        }
        assert!(routes[0].is_root());
    }

    #[test]
    fn test_serialize_as_string() {
        let json = serde_json::to_string(&vec![Route::root(), Route::parse("/faq")]).unwrap();
        assert_eq!(json, r#"["/","/faq"]"#);
    }
}
