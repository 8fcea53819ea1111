//! Point d'entrée CLI pour finess-fhir

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Convertir le répertoire FINESS en ressources FHIR Organization/Location (NDJSON)
#[derive(Parser)]
#[command(name = "finess-fhir")]
#[command(author, version)]
#[command(about = "Convertir le répertoire FINESS en NDJSON FHIR (Organization + Location)")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Generate {
            finess_file,
            output_dir,
            start,
            end,
            config,
            report,
        } => {
            info!(
                finess_file = %finess_file.display(),
                output_dir = %output_dir.display(),
                start = ?start,
                end = ?end,
                "Generate FHIR NDJSON"
            );
            cli::cmd_generate(
                &finess_file,
                &output_dir,
                start,
                end,
                &config,
                report.as_deref(),
            )?;
        }
        Commands::Inspect {
            finess_file,
            config,
        } => {
            cli::cmd_inspect(&finess_file, &config)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
