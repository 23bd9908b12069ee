// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pkgmeta::{ExtractOptions, PackageMetadata, extract_metadata_with};
use std::fs;
use tracing::info;

#[derive(Parser)]
#[command(name = "pkgmeta")]
#[command(author, version, about = "Extract package metadata from PKGBUILD recipes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a recipe and print the extracted fields
    Inspect {
        /// Path to the PKGBUILD file
        path: String,
        /// Print the raw field map as JSON instead of the summary
        #[arg(long)]
        json: bool,
    },
    /// Validate a recipe the way the submission workflow would
    Check {
        /// Path to the PKGBUILD file
        path: String,
        /// Also report lines the parser ignored
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Inspect { path, json } => {
            let result = run_extraction(&path, false)?;
            if let Some(error) = &result.error {
                anyhow::bail!("{}", error);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&result.fields)?);
            } else {
                let meta = PackageMetadata::from_fields(&result.fields)
                    .with_context(|| format!("Incomplete metadata in {}", path))?;
                println!("{} {}-{}", meta.name, meta.version, meta.release);
                println!("  Description: {}", meta.description);
                println!("  License: {}", meta.license);
                println!("  URL: {}", meta.url);
                println!("  Architecture: {}", meta.arch);
                if !meta.depends.is_empty() {
                    println!("  Depends: {}", meta.depends.join(" "));
                }
                if !meta.sources.is_empty() {
                    println!("  Sources: {}", meta.sources.join(" "));
                }
            }
            Ok(())
        }
        Commands::Check { path, strict } => {
            let result = run_extraction(&path, strict)?;

            if strict {
                for line in &result.ignored_lines {
                    eprintln!("Ignored: {}", line);
                }
            }

            match &result.error {
                Some(error) => {
                    eprintln!("{}", error);
                    std::process::exit(1);
                }
                None => {
                    let meta = PackageMetadata::from_fields(&result.fields)
                        .with_context(|| format!("Incomplete metadata in {}", path))?;
                    if !meta.url_has_scheme() {
                        eprintln!("Package URL is missing a protocol (ie. http:// ,ftp://)");
                        std::process::exit(1);
                    }
                    println!("OK: {} {}-{}", meta.name, meta.version, meta.release);
                    Ok(())
                }
            }
        }
    }
}

fn run_extraction(path: &str, collect_ignored: bool) -> Result<pkgmeta::Extraction> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read PKGBUILD: {}", path))?;
    info!("extracting metadata from {}", path);

    let opts = ExtractOptions {
        collect_ignored,
        ..ExtractOptions::default()
    };
    Ok(extract_metadata_with(&content, &opts))
}
