//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Route discovery and sitemap/robots emitter
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Config file path (default: sitemap.toml)
    #[arg(short = 'C', long, global = true, default_value = "sitemap.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Write a default sitemap.toml into the current directory
    #[command(visible_alias = "i")]
    Init {
        /// Print the config template to stdout instead of writing it
        #[arg(short = 'n', long)]
        dry: bool,
    },

    /// Generate sitemap.xml (and robots.txt if missing)
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Print the resolved route list
    #[command(visible_alias = "r")]
    Routes {
        #[command(flatten)]
        args: RoutesArgs,
    },
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Override site URL for deployment.
    ///
    /// Takes precedence over SITE_URL, VITE_SITE_URL, PUBLIC_SITE_URL
    /// and `[site] url` in sitemap.toml.
    ///
    /// Example: sitemapper generate --site-url "https://tradecertify.com.au"
    #[arg(short = 'U', long = "site-url", value_hint = clap::ValueHint::Url)]
    pub site_url: Option<String>,

    /// Minify the sitemap XML
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,

    /// Print the sitemap to stdout without writing any files
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Routes command arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct RoutesArgs {
    /// Output JSON (`{"source": ..., "routes": [...]}`)
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long)]
    pub pretty: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

impl Cli {
    /// Whether the selected subcommand asked for verbose output.
    pub const fn verbose(&self) -> bool {
        match &self.command {
            Commands::Generate { args } => args.verbose,
            Commands::Routes { args } => args.verbose,
            Commands::Init { .. } => false,
        }
    }
}
