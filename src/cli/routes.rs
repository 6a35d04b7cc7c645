//! Routes command: print the resolved route list.
//!
//! Plain output is one route per line. `--json` prints
//! `{"source": "...", "routes": [...]}`.

use anyhow::Result;

use crate::cli::RoutesArgs;
use crate::config::SiteConfig;
use crate::routes::{ResolvedRoutes, resolve_routes};

pub fn run_routes(config: &SiteConfig, args: &RoutesArgs) -> Result<()> {
    let resolved = resolve_routes(config);
    println!("{}", format_routes(&resolved, args)?);
    Ok(())
}

fn format_routes(resolved: &ResolvedRoutes, args: &RoutesArgs) -> Result<String> {
    if args.json {
        let json = if args.pretty {
            serde_json::to_string_pretty(resolved)?
        } else {
            serde_json::to_string(resolved)?
        };
        return Ok(json);
    }

    Ok(resolved
        .routes
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join("\n"))
}
