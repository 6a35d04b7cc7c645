//! sitemapper - Route discovery and sitemap/robots emitter for static sites.

mod cli;
mod config;
mod core;
mod generator;
mod logger;
mod routes;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::{ConfigError, SiteConfig};
use crate::core::{Environment, SITE_URL_ENV_VARS};

fn main() {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    if let Err(e) = run(&cli) {
        report_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = SiteConfig::load(cli)?;

    match &cli.command {
        Commands::Init { dry } => cli::init::init_config(config.get_root(), &cli.config, *dry),
        Commands::Generate { args } => {
            let env = Environment::capture(config.get_root());
            cli::generate::generate(&config, &env, args).map(|_| ())
        }
        Commands::Routes { args } => cli::routes::run_routes(&config, args),
    }
}

fn report_error(e: &anyhow::Error) {
    log!("error"; "{:#}", e);

    if let Some(ConfigError::MissingSiteUrl { .. }) = e.downcast_ref::<ConfigError>() {
        log!(
            "hint";
            "set one of {} (environment or .env), pass --site-url, or set `url` under [site] in {}",
            SITE_URL_ENV_VARS.join(", "),
            config::CONFIG_FILE
        );
    }
}
