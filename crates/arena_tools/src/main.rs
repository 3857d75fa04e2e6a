//! Arena Map Generator - Development Tools

use std::path::Path;

use arena_tools::loader::load_settings;
use arena_tools::preview::{generate_preview, render_ascii, MapSelection, MapSummary};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "arena-tools")]
#[command(about = "Development tools for the arena map generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate map set files
    Validate {
        /// Path to data directory
        #[arg(default_value = "assets/data")]
        path: String,
    },
    /// Generate a map and print it
    Preview {
        /// Path to a map set file
        path: String,
        /// Map index within the set
        #[arg(long, conflicts_with = "wave")]
        index: Option<usize>,
        /// Wave number (1-based), selects map `wave - 1`
        #[arg(long)]
        wave: Option<u32>,
        /// Print a JSON summary instead of ASCII art
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path } => {
            tracing::info!("Validating map sets in: {path}");
            match arena_tools::validate::validate_data_directory(Path::new(&path)) {
                Ok(count) => tracing::info!("Validation passed ({count} file(s))"),
                Err(e) => {
                    tracing::error!("Validation failed: {e}");
                    std::process::exit(1);
                }
            }
        }
        Commands::Preview {
            path,
            index,
            wave,
            json,
        } => {
            let selection = match (index, wave) {
                (_, Some(wave)) => MapSelection::Wave(wave),
                (Some(index), None) => MapSelection::Index(index),
                (None, None) => MapSelection::default(),
            };
            if let Err(e) = preview(Path::new(&path), selection, json) {
                tracing::error!("Preview failed: {e}");
                std::process::exit(1);
            }
        }
    }
}

fn preview(
    path: &Path,
    selection: MapSelection,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = load_settings(path)?;
    let layout = generate_preview(settings, selection)?;
    if json {
        println!("{}", MapSummary::from_layout(&layout).to_json()?);
    } else {
        print!("{}", render_ascii(&layout));
    }
    Ok(())
}
