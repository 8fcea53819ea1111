//! Définition et implémentation des commandes CLI
//!
//! - `generate`: FINESS → NDJSON FHIR (Organization + Location)
//! - `inspect`: statistiques du fichier source, sans écriture

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Subcommand;
use tracing::info;

use finess_fhir::{Config, Generator, RunStatus};

#[derive(Subcommand)]
pub enum Commands {
    /// Generate FHIR Organization/Location NDJSON from a FINESS extract
    Generate {
        /// Path to the FINESS file (structureet + geolocalisation lines)
        #[arg(long)]
        finess_file: PathBuf,

        /// Output directory for etab{start}-{end}.ndjson
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,

        /// First establishment index (inclusive, default 0)
        #[arg(long)]
        start: Option<usize>,

        /// Last establishment index (exclusive, default: all)
        #[arg(long)]
        end: Option<usize>,

        /// Config preset name (standard/extended) or path to a JSON config
        #[arg(long, default_value = "extended")]
        config: String,

        /// Write the generation report as JSON to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print statistics about a FINESS file without generating anything
    Inspect {
        /// Path to the FINESS file
        #[arg(long)]
        finess_file: PathBuf,

        /// Config preset name or path (used for the source encoding)
        #[arg(long, default_value = "extended")]
        config: String,
    },
}

/// Génère le NDJSON d'une tranche
pub fn cmd_generate(
    finess_file: &Path,
    output_dir: &Path,
    start: Option<usize>,
    end: Option<usize>,
    config: &str,
    report_path: Option<&Path>,
) -> Result<()> {
    let config = Config::resolve(config)?;
    info!(profile = ?config.profile, encoding = %config.encoding, "Config loaded");

    let generator = Generator::load(finess_file, config)?;
    let (report, outcome) = generator.generate(output_dir, start, end)?;

    report.display();

    // Rapport sauvegardé même en cas d'arrêt fatal
    if let Some(path) = report_path {
        report.save_to_file(path)?;
        info!(path = %path.display(), "Report saved");
    }

    if report.status == RunStatus::PartialSuccess {
        info!("Some locations were skipped, see report for details");
    }

    outcome?;
    Ok(())
}

/// Affiche les statistiques du fichier source
pub fn cmd_inspect(finess_file: &Path, config: &str) -> Result<()> {
    let config = Config::resolve(config)?;
    let generator = Generator::load(finess_file, config)?;
    let geo_index = generator.geo_index();

    println!("\n{}", "=".repeat(60));
    println!("FINESS: {}", finess_file.display());
    println!("{}", "=".repeat(60));
    println!("Establishments:     {}", generator.establishments().len());
    println!("Geolocations:       {}", geo_index.len());
    println!("Duplicate geo keys: {}", geo_index.duplicates());

    let not_geolocated = generator
        .establishments()
        .iter()
        .filter(|e| geo_index.get(&e.nofinesset).is_none())
        .count();
    println!("Not geolocated:     {}", not_geolocated);

    println!("\nCoordinate systems:");
    for (system, count) in geo_index.source_systems() {
        println!("  {:<40} {}", system, count);
    }
    println!("{}", "=".repeat(60));

    Ok(())
}
