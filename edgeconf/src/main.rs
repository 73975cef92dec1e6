//! Edgeconf - nginx configuration for static sites on object storage
//!
//! This is the main entry point for the Edgeconf CLI.

use anyhow::Context;
use clap::{Parser, Subcommand};
use edgeconf_core::{ConfigLoader, GeneratorConfig};
use edgeconf_site::{PostBuild, SiteManifest};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Edgeconf - generate nginx configuration for a built static site
#[derive(Parser)]
#[command(name = "edgeconf")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the nginx configuration for a site
    Generate {
        /// Path to the site manifest (JSON)
        #[arg(long, default_value = "site-manifest.json")]
        site: PathBuf,

        /// Generator configuration (TOML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory the configuration is written to (defaults to the manifest's directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Print the configuration instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Validate the redirects of a site manifest
    Validate {
        /// Path to the site manifest (JSON)
        #[arg(long, default_value = "site-manifest.json")]
        site: PathBuf,
    },

    /// Print the default generator configuration as TOML
    #[command(name = "default-config")]
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    if cli.verbose {
        tracing::debug!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Generate {
            site,
            config,
            out_dir,
            stdout,
        } => {
            let config = ConfigLoader::load_or_default(config.as_deref())
                .context("Failed to load generator configuration")?;
            let manifest = load_site(&site)?;
            let post_build = PostBuild::new(&config);

            if stdout {
                let text = post_build
                    .render(&manifest)
                    .context("Failed to generate nginx configuration")?;
                println!("{}", text);
            } else {
                let out_dir = out_dir.unwrap_or_else(|| site_dir(&site));
                let path = post_build
                    .run(&manifest, &out_dir)
                    .context("Failed to generate nginx configuration")?;
                println!("✅ Wrote {}", path.display());
            }
        }

        Commands::Validate { site } => {
            let manifest = load_site(&site)?;
            edgeconf_nginx::validate_redirects(&manifest.redirects)
                .context("Invalid redirect")?;
            tracing::info!("{} redirect(s) valid", manifest.redirects.len());
            println!("✅ {} redirect(s) valid", manifest.redirects.len());
        }

        Commands::DefaultConfig => {
            print!("{}", ConfigLoader::to_toml(&GeneratorConfig::default())?);
        }
    }

    Ok(())
}

fn load_site(path: &Path) -> anyhow::Result<SiteManifest> {
    tracing::info!("Loading site manifest: {}", path.display());
    SiteManifest::load(path)
        .with_context(|| format!("Failed to load site manifest {}", path.display()))
}

/// Directory containing the manifest
fn site_dir(site: &Path) -> PathBuf {
    site.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
