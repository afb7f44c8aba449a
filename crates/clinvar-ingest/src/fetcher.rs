// ClinVar fetch-and-load pipeline
//
// 1. Validate the genome version (no side effects on failure)
// 2. Download the VCF from NCBI to the local staging path
// 3. Copy the staged file into HDFS
// 4. Read the release date from the local copy's header
// 5. Import the HDFS copy through the engine and attach the release date

use clinvar_common::types::GenomeVersion;
use clinvar_common::Result;
use std::time::Instant;
use tracing::{info, warn};

use crate::config::IngestConfig;
use crate::engine::{ImportOptions, VariantEngine, VariantTable};
use crate::header::parse_release_date;
use crate::transfer::Transfer;

/// Global annotation holding the ClinVar release date
pub const RELEASE_DATE_GLOBAL: &str = "version";

pub struct ClinvarFetcher<T, E> {
    config: IngestConfig,
    transfer: T,
    engine: E,
}

impl<T: Transfer, E: VariantEngine> ClinvarFetcher<T, E> {
    pub fn new(config: IngestConfig, transfer: T, engine: E) -> Self {
        Self {
            config,
            transfer,
            engine,
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Download the latest ClinVar VCF for `genome_version` ("37" or "38"),
    /// stage it into HDFS and import it, with the release date from the VCF
    /// header set as the `version` global
    pub fn download_and_import_latest(&self, genome_version: &str) -> Result<VariantTable> {
        let genome_version: GenomeVersion = genome_version.parse()?;
        self.fetch_and_import(genome_version)
    }

    pub fn fetch_and_import(&self, genome_version: GenomeVersion) -> Result<VariantTable> {
        self.config.validate()?;

        let start_time = Instant::now();
        let url = self.config.source_url(genome_version);
        let local_path = self.config.local_staging_path.as_path();
        let dfs_path = self.config.dfs_path()?;

        info!(
            genome_version = %genome_version,
            %url,
            local = %local_path.display(),
            dfs = %dfs_path,
            "Starting ClinVar ingest"
        );

        self.transfer.fetch_remote(&url, local_path)?;
        self.transfer.copy_to_dfs(local_path, &dfs_path)?;

        let release_date = parse_release_date(local_path)?;
        match release_date {
            Some(ref date) => info!(release_date = %date, "Found ClinVar release date"),
            None => warn!(path = %local_path.display(), "No release date in VCF header"),
        }

        let options = ImportOptions::new(genome_version)
            .drop_samples(true)
            .min_partitions(self.config.min_partitions)
            .skip_invalid_loci(true)
            .output_path(self.config.table_path(genome_version));

        let table = self
            .engine
            .import_vcf(&dfs_path, &options)?
            .annotate_globals(RELEASE_DATE_GLOBAL, serde_json::to_value(&release_date)?);

        info!(
            genome_version = %genome_version,
            duration_ms = start_time.elapsed().as_millis() as u64,
            "ClinVar ingest complete"
        );
        Ok(table)
    }
}
