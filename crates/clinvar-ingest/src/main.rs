//! ClinVar Ingest - fetch, stage and import the ClinVar VCF

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clinvar_common::logging::{init_logging, LogConfig, LogLevel};
use clinvar_ingest::config::{DownloadBackend, IngestConfig};
use clinvar_ingest::gold_stars::{gold_stars, CLINVAR_GOLD_STARS};
use clinvar_ingest::{parse_release_date, ClinvarFetcher, CommandEngine, SystemTransfer};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "clinvar-ingest")]
#[command(author, version, about = "ClinVar VCF ingestion tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the latest ClinVar VCF, stage it into HDFS and import it
    Load {
        /// Reference genome build: 37 or 38
        #[arg(short, long)]
        genome_version: String,

        /// Download with wget or a native FTP client
        #[arg(long, env = "CLINVAR_DOWNLOAD_BACKEND")]
        backend: Option<DownloadBackend>,

        /// Importer executable
        #[arg(long, env = "CLINVAR_ENGINE_PROGRAM")]
        engine_program: Option<String>,

        /// Also write the resulting table handle as JSON to this file
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Print the release date from a local ClinVar VCF header
    ReleaseDate {
        /// Path to a gzip compressed VCF
        path: PathBuf,
    },

    /// Print gold stars for a review status, or the whole table
    GoldStars {
        /// Review status as it appears in CLNREVSTAT
        review_status: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };

    let log_config = LogConfig::builder()
        .level(log_level)
        .log_file_prefix("clinvar-ingest")
        .build()
        .merge_env()?;

    let _guard = init_logging(&log_config)?;

    match cli.command {
        Command::Load {
            genome_version,
            backend,
            engine_program,
            manifest,
        } => {
            let mut config = IngestConfig::from_env()?;
            if let Some(backend) = backend {
                config = config.with_download_backend(backend);
            }
            if let Some(program) = engine_program {
                config = config.with_engine_program(program);
            }

            let transfer = SystemTransfer::from_config(&config);
            let engine = CommandEngine::new(config.engine_program.clone());
            let fetcher = ClinvarFetcher::new(config, transfer, engine);

            let table = fetcher
                .download_and_import_latest(&genome_version)
                .with_context(|| format!("ClinVar ingest failed for GRCh{}", genome_version))?;

            let json = serde_json::to_string_pretty(&table)?;
            if let Some(path) = manifest {
                std::fs::write(&path, &json)
                    .with_context(|| format!("Failed to write manifest {}", path.display()))?;
                info!("Table manifest saved to {}", path.display());
            }
            println!("{}", json);
        },
        Command::ReleaseDate { path } => {
            let release_date = parse_release_date(&path)
                .with_context(|| format!("Failed to read VCF header from {}", path.display()))?;
            match release_date {
                Some(date) => println!("{}", date),
                None => {
                    warn!("No release date found in {}", path.display());
                    println!("null");
                },
            }
        },
        Command::GoldStars { review_status } => match review_status {
            Some(status) => match gold_stars(&status) {
                Some(stars) => println!("{}", stars),
                None => anyhow::bail!("Unknown review status: {}", status),
            },
            None => {
                for (status, stars) in CLINVAR_GOLD_STARS {
                    println!("{}\t{}", status, stars);
                }
            },
        },
    }

    Ok(())
}
