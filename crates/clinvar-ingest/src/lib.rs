//! ClinVar Ingest Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Fetches the weekly ClinVar VCF from NCBI, stages it into HDFS and imports it
//! through an external variant table engine, tagged with the release date from
//! the VCF header.
//!
//! # Example
//!
//! ```no_run
//! use clinvar_ingest::config::IngestConfig;
//! use clinvar_ingest::engine::CommandEngine;
//! use clinvar_ingest::fetcher::ClinvarFetcher;
//! use clinvar_ingest::transfer::SystemTransfer;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = IngestConfig::from_env()?;
//!     let transfer = SystemTransfer::from_config(&config);
//!     let engine = CommandEngine::new(config.engine_program.clone());
//!
//!     let table = ClinvarFetcher::new(config, transfer, engine).download_and_import_latest("38")?;
//!     println!("release: {:?}", table.global("version"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod fetcher;
pub mod gold_stars;
pub mod header;
pub mod transfer;

pub use config::IngestConfig;
pub use engine::{CommandEngine, ImportOptions, VariantEngine, VariantTable};
pub use fetcher::ClinvarFetcher;
pub use gold_stars::gold_stars;
pub use header::parse_release_date;
pub use transfer::{SystemTransfer, Transfer};
