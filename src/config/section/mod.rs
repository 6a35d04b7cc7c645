//! Configuration section definitions.
//!
//! Each module corresponds to a section in `sitemap.toml`:
//!
//! | Module      | TOML Section                         | Purpose                        |
//! |-------------|--------------------------------------|--------------------------------|
//! | `info`      | `[site]`                             | Site name and default URL      |
//! | `routes`    | `[routes]`                           | Explicit and baseline routes   |
//! | `catalogue` | `[[catalogue]]`                      | Content catalogues             |
//! | `output`    | `[sitemap]`, `[robots]`, `[build]`   | Output files and directories   |

mod catalogue;
mod info;
mod output;
mod routes;

pub use catalogue::CatalogueConfig;
pub use info::SiteInfoConfig;
pub use output::{BuildConfig, RobotsConfig, SitemapConfig};
pub use routes::{DEFAULT_BASELINE_ROUTES, RoutesConfig};
