//! Process environment snapshot.
//!
//! Environment variables and the run date are captured once at startup into an [`Environment`] and passed down explicitly.
//! A `.env` file in the project root is merged in; variables already set in
//! the process take precedence over it.

use crate::{debug, log, utils::date::DateUtc};
use rustc_hash::FxHashMap;
use std::path::Path;

/// Name of the optional dotenv file in the project root.
pub const DOTENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct Environment {
    vars: FxHashMap<String, String>,
    today: DateUtc,
}

impl Environment {
    /// Capture the current process environment for a project rooted at `root`.
    pub fn capture(root: &Path) -> Self {
        let mut vars = load_dotenv(&root.join(DOTENV_FILE));

        // Non-UTF-8 variables can't hold a URL we could use, skip them
        vars.extend(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );

        Self {
            vars,
            today: DateUtc::today(),
        }
    }

    /// Build an environment from explicit values.
    pub fn from_vars<I, K, V>(vars: I, today: DateUtc) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            today,
        }
    }

    /// Look up a variable.
    pub fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Date of this run, fixed for its whole duration.
    pub const fn today(&self) -> DateUtc {
        self.today
    }
}

/// Read `KEY=value` pairs from a dotenv file.
///
/// A missing file yields nothing; malformed lines are skipped with a warning.
pub fn load_dotenv(path: &Path) -> FxHashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) if e.not_found() => return FxHashMap::default(),
        Err(e) => {
            log!("warning"; "could not read {}: {}", path.display(), e);
            return FxHashMap::default();
        }
    };

    let vars: FxHashMap<String, String> = iter
        .filter_map(|item| match item {
            Ok(pair) => Some(pair),
            Err(e) => {
                log!("warning"; "skipping malformed line in {}: {}", path.display(), e);
                None
            }
        })
        .collect();

    debug!("env"; "loaded {} variable(s) from {}", vars.len(), path.display());
    vars
}
