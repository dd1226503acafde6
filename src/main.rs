//! CLI entry point for folio-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Blog content pipeline for a personal portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List articles in listing order
    #[command(alias = "ls")]
    List {
        /// Print summaries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one article's body
    Show {
        /// Article slug (file name without extension)
        slug: String,

        /// Print metadata, body, headings and HTML as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print one article's table of contents
    Toc {
        /// Article slug (file name without extension)
        slug: String,

        /// Print the table of contents as HTML
        #[arg(long)]
        html: bool,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate,

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::List { json } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::list::run(&folio, json)?;
        }

        Commands::Show { slug, json } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::show::run(&folio, &slug, json)?;
        }

        Commands::Toc { slug, html } => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            folio_rs::commands::toc::run(&folio, &slug, html)?;
        }

        Commands::Generate => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Generating static files...");
            folio.generate()?;
            println!("Generated successfully!");
        }

        Commands::Clean => {
            let folio = folio_rs::Folio::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("folio-rs version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
