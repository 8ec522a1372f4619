//! house-export - procedural house export tool
//!
//! Builds the houses described by a manifest (house.toml) into GPU-ready
//! binary meshes (.hgeo) plus JSON descriptors and OBJ previews.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use house_export::{build, manifest};

#[derive(Parser)]
#[command(name = "house-export")]
#[command(about = "Procedural house export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build houses from a manifest file
    Build {
        /// Path to house.toml manifest
        #[arg(default_value = "house.toml")]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Footprint seed (overrides manifest)
        #[arg(long)]
        seed: Option<u64>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate manifest without building
    Check {
        /// Path to house.toml manifest
        #[arg(default_value = "house.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            manifest,
            output,
            seed,
            verbose,
        } => {
            if verbose {
                tracing::info!("Building houses from {:?}", manifest);
            }
            let config = manifest::load_manifest(&manifest)?;
            let base_dir = manifest.parent().unwrap_or(Path::new("."));
            let report = build::build_all(&config, base_dir, output.as_deref(), seed)?;
            tracing::info!(
                "Build complete! {} vertices, {} indices",
                report.vertex_count,
                report.index_count
            );
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
