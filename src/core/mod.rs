//! Core types - pure abstractions shared across the codebase.

mod env;
mod route;
mod site_url;

pub use env::{DOTENV_FILE, Environment, load_dotenv};
pub use route::{Route, normalize_routes};
pub use site_url::{SITE_URL_ENV_VARS, SiteUrl, SiteUrlOrigin};
