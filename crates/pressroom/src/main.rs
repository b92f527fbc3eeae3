//! Pressroom CLI - publishing toolkit for a headless CMS.
//!
//! Provides commands for:
//! - `render`: Render article markdown or stored HTML to display HTML
//! - `fetch`: Read a collection or entry from the content API
//! - `meta`: Extract link preview metadata from a page

mod commands;
mod context;
mod error;
mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pressroom_config::CliSettings;
use tracing_subscriber::EnvFilter;

use commands::{FetchArgs, MetaArgs, RenderArgs};
use context::AppContext;
use error::CliError;
use output::Output;

/// Pressroom - publishing toolkit.
#[derive(Parser)]
#[command(name = "pressroom", version, about)]
struct Cli {
    /// Path to configuration file (default: auto-discover pressroom.toml).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override content API base URL.
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Override content API token.
    #[arg(long, global = true, env = "PRESSROOM_API_TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Enable verbose output (INFO level logs).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render article body to HTML.
    Render(RenderArgs),
    /// Fetch content from the CMS API.
    Fetch(FetchArgs),
    /// Extract link preview metadata from a URL.
    Meta(MetaArgs),
}

impl Cli {
    fn settings(&self) -> CliSettings {
        CliSettings {
            base_url: self.base_url.clone(),
            api_token: self.api_token.clone(),
        }
    }

    fn run(self, output: &Output) -> Result<(), CliError> {
        let settings = self.settings();
        match self.command {
            Commands::Render(args) => args.execute(output),
            Commands::Fetch(args) => {
                let ctx = AppContext::init(self.config.as_deref(), &settings)?;
                args.execute(&ctx, output)
            }
            Commands::Meta(args) => {
                let ctx = AppContext::init(self.config.as_deref(), &settings)?;
                args.execute(&ctx, output)
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so command results on stdout stay machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.run(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
