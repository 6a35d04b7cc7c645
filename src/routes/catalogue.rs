//! Catalogue-derived routes.
//!
//! A catalogue is a list of records with a `slug`. Each catalogue names
//! candidate files; the first one that exists is read:
//!
//! ```toml
//! # trades.toml
//! [[entries]]
//! slug = "carpentry"
//! name = "Carpentry RPL"
//! ```
//!
//! ```json
//! [{ "slug": "carpentry", "name": "Carpentry RPL" }]
//! ```
//!
//! Other record fields are ignored.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashSet;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{DataFormat, SourceError, error_chain, read_data_file};
use crate::config::CatalogueConfig;
use crate::{debug, log};

#[derive(Debug, Default, Deserialize)]
struct CatalogueFile {
    #[serde(default, alias = "entry")]
    entries: Vec<CatalogueRecord>,
}

#[derive(Debug, Deserialize)]
struct CatalogueRecord {
    #[serde(default)]
    slug: Option<String>,
}

/// Routes derived from every configured catalogue.
pub fn derive_routes(catalogues: &[CatalogueConfig]) -> Vec<String> {
    let mut routes = Vec::new();

    for catalogue in catalogues {
        let Some(path) = locate(&catalogue.candidates) else {
            log!(
                "warning";
                "no `{}` catalogue found (tried {})",
                catalogue.name,
                display_paths(&catalogue.candidates)
            );
            continue;
        };

        match load_slugs(path) {
            Ok(slugs) if slugs.is_empty() => {
                log!("warning"; "`{}` catalogue {} has no slugs", catalogue.name, path.display());
            }
            Ok(slugs) => {
                log!(
                    "routes";
                    "{} `{}` route(s) from {}",
                    slugs.len(),
                    catalogue.name,
                    path.display()
                );
                routes.extend(slugs.iter().map(|slug| catalogue.route_for(slug)));
            }
            Err(e) => {
                log!("warning"; "{}, skipping `{}` catalogue", error_chain(&e), catalogue.name);
            }
        }
    }

    routes
}

/// First candidate that exists as a file.
pub fn locate(candidates: &[PathBuf]) -> Option<&Path> {
    candidates
        .iter()
        .inspect(|c| debug!("catalogue"; "trying {}", c.display()))
        .find(|c| c.is_file())
        .map(PathBuf::as_path)
}

/// Unique, non-empty slugs from a catalogue file, in file order.
pub fn load_slugs(path: &Path) -> Result<Vec<String>, SourceError> {
    let (format, content) = read_data_file(path)?;
    let slugs = match format {
        DataFormat::Toml => parse_toml_slugs(&content)
            .map_err(|e| SourceError::Toml(path.to_path_buf(), e))?,
        DataFormat::Json => parse_json_slugs(&content)
            .map_err(|e| SourceError::Json(path.to_path_buf(), e))?,
    };
    Ok(dedup_slugs(slugs))
}

fn parse_toml_slugs(content: &str) -> Result<Vec<String>, toml::de::Error> {
    let file: CatalogueFile = toml::from_str(content)?;
    Ok(file.entries.into_iter().filter_map(|r| r.slug).collect())
}

/// Records without a string `slug` are skipped; a non-array document
/// yields nothing.
fn parse_json_slugs(content: &str) -> Result<Vec<String>, serde_json::Error> {
    let value: JsonValue = serde_json::from_str(content)?;
    let JsonValue::Array(records) = value else {
        return Ok(Vec::new());
    };

    Ok(records
        .iter()
        .filter_map(|record| record.get("slug")?.as_str())
        .map(str::to_string)
        .collect())
}

fn dedup_slugs(slugs: Vec<String>) -> Vec<String> {
    let mut seen = FxHashSet::default();
    slugs
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn trades(dir: &Path) -> CatalogueConfig {
        CatalogueConfig {
            candidates: vec![dir.join("trades.toml"), dir.join("trades.json")],
            ..CatalogueConfig::default()
        }
    }

    #[test]
    fn test_json_duplicate_slugs_appear_once() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("trades.json"),
            r#"[{"slug":"carpentry"},{"slug":"plumbing"},{"slug":"carpentry"}]"#,
        )
        .unwrap();

        let routes = derive_routes(&[trades(dir.path())]);
        assert_eq!(routes, vec!["/services/carpentry", "/services/plumbing"]);
    }

    #[test]
    fn test_json_skips_records_without_slug() {
        let slugs = parse_json_slugs(
            r#"[{"slug": "painting"}, {"name": "no slug"}, {"slug": 7}, null, {"slug": ""}]"#,
        )
        .unwrap();
        assert_eq!(dedup_slugs(slugs), vec!["painting"]);
    }

    #[test]
    fn test_json_non_array_is_empty() {
        assert!(parse_json_slugs(r#"{"slug": "carpentry"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_toml_entries() {
        let slugs = parse_toml_slugs(
            r#"
[[entries]]
slug = "auto-electrical"
name = "Auto Electrical RPL"

[[entries]]
name = "Draft without slug"
"#,
        )
        .unwrap();
        assert_eq!(slugs, vec!["auto-electrical"]);

        let slugs = parse_toml_slugs("[[entry]]\nslug = \"painting\"").unwrap();
        assert_eq!(slugs, vec!["painting"]);
    }

    #[test]
    fn test_toml_preferred_over_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("trades.toml"), "[[entries]]\nslug = \"from-toml\"").unwrap();
        fs::write(dir.path().join("trades.json"), r#"[{"slug": "from-json"}]"#).unwrap();

        let routes = derive_routes(&[trades(dir.path())]);
        assert_eq!(routes, vec!["/services/from-toml"]);
    }

    #[test]
    fn test_malformed_file_yields_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("trades.json"), "[{").unwrap();

        assert!(matches!(
            load_slugs(&dir.path().join("trades.json")),
            Err(SourceError::Json(..))
        ));
        assert!(derive_routes(&[trades(dir.path())]).is_empty());
    }

    #[test]
    fn test_missing_catalogue_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(locate(&trades(dir.path()).candidates).is_none());
        assert!(derive_routes(&[trades(dir.path())]).is_empty());
    }

    #[test]
    fn test_multiple_catalogues() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("trades.json"), r#"[{"slug": "plumbing"}]"#).unwrap();
        fs::write(
            dir.path().join("qualifications.json"),
            r#"[{"slug": "cpc30220"}]"#,
        )
        .unwrap();
        let qualifications = CatalogueConfig {
            name: "qualifications".into(),
            template: "/qualifications/{slug}".into(),
            candidates: vec![dir.path().join("qualifications.json")],
        };

        let routes = derive_routes(&[trades(dir.path()), qualifications]);
        assert_eq!(
            routes,
            vec!["/services/plumbing", "/qualifications/cpc30220"]
        );
    }

    #[test]
    fn test_locate_skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("trades.toml")).unwrap();
        fs::write(dir.path().join("trades.json"), "[]").unwrap();

        let candidates = trades(dir.path()).candidates;
        assert_eq!(locate(&candidates), Some(dir.path().join("trades.json").as_path()));
    }
}
