// ClinVar ingest configuration

use clinvar_common::types::GenomeVersion;
use clinvar_common::{ClinvarError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// ============================================================================
// Defaults
// ============================================================================

/// NCBI FTP location of the weekly ClinVar VCF, one per genome build
pub const CLINVAR_FTP_PATH: &str =
    "ftp://ftp.ncbi.nlm.nih.gov/pub/clinvar/vcf_GRCh{genome_version}/clinvar.vcf.gz";

/// Where the engine writes the imported table
pub const CLINVAR_HT_PATH: &str =
    "gs://seqr-reference-data/GRCh{genome_version}/clinvar/clinvar.GRCh{genome_version}.ht";

pub const DEFAULT_LOCAL_STAGING_PATH: &str = "/tmp/clinvar.vcf.gz";

/// Partition hint passed to the engine on import
pub const DEFAULT_MIN_PARTITIONS: u32 = 2000;

const TEMPLATE_PLACEHOLDER: &str = "{genome_version}";

/// How the remote VCF is fetched to the staging path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownloadBackend {
    /// Shell out to `wget <url> -O <path>`
    #[default]
    Wget,
    /// Native FTP transfer
    Ftp,
}

impl DownloadBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadBackend::Wget => "wget",
            DownloadBackend::Ftp => "ftp",
        }
    }
}

impl std::str::FromStr for DownloadBackend {
    type Err = ClinvarError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "wget" => Ok(DownloadBackend::Wget),
            "ftp" => Ok(DownloadBackend::Ftp),
            other => Err(ClinvarError::config(format!(
                "unknown download backend '{}' (expected 'wget' or 'ftp')",
                other
            ))),
        }
    }
}

/// ClinVar ingest configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Remote VCF URL, `{genome_version}` is substituted
    pub source_url_template: String,

    /// Fixed local path the download is written to (overwritten on every run)
    pub local_staging_path: PathBuf,

    /// HDFS client executable
    pub hdfs_program: String,

    pub download_backend: DownloadBackend,

    /// FTP credentials, only used by the native FTP backend
    pub ftp_username: String,
    pub ftp_password: String,

    pub min_partitions: u32,

    /// Output table location, `{genome_version}` is substituted
    pub table_path_template: String,

    /// Importer executable invoked by the command engine
    pub engine_program: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            source_url_template: CLINVAR_FTP_PATH.to_string(),
            local_staging_path: PathBuf::from(DEFAULT_LOCAL_STAGING_PATH),
            hdfs_program: "hdfs".to_string(),
            download_backend: DownloadBackend::Wget,
            ftp_username: "anonymous".to_string(),
            ftp_password: "anonymous@".to_string(),
            min_partitions: DEFAULT_MIN_PARTITIONS,
            table_path_template: CLINVAR_HT_PATH.to_string(),
            engine_program: "clinvar-import-vcf".to_string(),
        }
    }
}

impl IngestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from `CLINVAR_*` environment variables over the defaults
    ///
    /// Environment variables:
    /// - `CLINVAR_SOURCE_URL_TEMPLATE`
    /// - `CLINVAR_LOCAL_STAGING_PATH`
    /// - `CLINVAR_HDFS_PROGRAM`
    /// - `CLINVAR_DOWNLOAD_BACKEND` (wget, ftp)
    /// - `CLINVAR_FTP_USERNAME` / `CLINVAR_FTP_PASSWORD`
    /// - `CLINVAR_MIN_PARTITIONS`
    /// - `CLINVAR_TABLE_PATH_TEMPLATE`
    /// - `CLINVAR_ENGINE_PROGRAM`
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(template) = std::env::var("CLINVAR_SOURCE_URL_TEMPLATE") {
            config.source_url_template = template;
        }

        if let Ok(path) = std::env::var("CLINVAR_LOCAL_STAGING_PATH") {
            config.local_staging_path = PathBuf::from(path);
        }

        if let Ok(program) = std::env::var("CLINVAR_HDFS_PROGRAM") {
            config.hdfs_program = program;
        }

        if let Ok(backend) = std::env::var("CLINVAR_DOWNLOAD_BACKEND") {
            config.download_backend = backend.parse()?;
        }

        if let Ok(username) = std::env::var("CLINVAR_FTP_USERNAME") {
            config.ftp_username = username;
        }

        if let Ok(password) = std::env::var("CLINVAR_FTP_PASSWORD") {
            config.ftp_password = password;
        }

        if let Ok(partitions) = std::env::var("CLINVAR_MIN_PARTITIONS") {
            config.min_partitions = partitions.parse().map_err(|_| {
                ClinvarError::config(format!("CLINVAR_MIN_PARTITIONS is not a number: {}", partitions))
            })?;
        }

        if let Ok(template) = std::env::var("CLINVAR_TABLE_PATH_TEMPLATE") {
            config.table_path_template = template;
        }

        if let Ok(program) = std::env::var("CLINVAR_ENGINE_PROGRAM") {
            config.engine_program = program;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the source template and staging path before any transfer runs
    pub fn validate(&self) -> Result<()> {
        if !self.source_url_template.contains(TEMPLATE_PLACEHOLDER) {
            return Err(ClinvarError::config(format!(
                "source URL template must contain {}",
                TEMPLATE_PLACEHOLDER
            )));
        }
        if self.local_staging_path.file_name().is_none() {
            return Err(ClinvarError::config(format!(
                "staging path has no file name: {}",
                self.local_staging_path.display()
            )));
        }
        Ok(())
    }

    pub fn with_local_staging_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.local_staging_path = path.into();
        self
    }

    pub fn with_source_url_template(mut self, template: impl Into<String>) -> Self {
        self.source_url_template = template.into();
        self
    }

    pub fn with_download_backend(mut self, backend: DownloadBackend) -> Self {
        self.download_backend = backend;
        self
    }

    pub fn with_min_partitions(mut self, partitions: u32) -> Self {
        self.min_partitions = partitions;
        self
    }

    pub fn with_engine_program(mut self, program: impl Into<String>) -> Self {
        self.engine_program = program.into();
        self
    }

    /// Remote URL of the VCF for a genome build
    pub fn source_url(&self, genome_version: GenomeVersion) -> String {
        substitute(&self.source_url_template, genome_version)
    }

    /// Output table location for a genome build
    pub fn table_path(&self, genome_version: GenomeVersion) -> String {
        substitute(&self.table_path_template, genome_version)
    }

    /// Distributed filesystem destination for the staged file
    pub fn dfs_path(&self) -> Result<String> {
        dfs_path_for(&self.local_staging_path)
    }
}

/// HDFS destination for a local file: its base name under the filesystem root
///
/// HDFS paths are UTF-8, so a non-UTF-8 base name is rejected rather than mangled.
pub fn dfs_path_for(local_path: &Path) -> Result<String> {
    let name = local_path.file_name().ok_or_else(|| {
        ClinvarError::config(format!("path has no file name: {}", local_path.display()))
    })?;
    let name = name.to_str().ok_or_else(|| {
        ClinvarError::config(format!(
            "file name is not valid UTF-8: {}",
            local_path.display()
        ))
    })?;
    Ok(format!("/{}", name))
}

fn substitute(template: &str, genome_version: GenomeVersion) -> String {
    template.replace(TEMPLATE_PLACEHOLDER, genome_version.as_str())
}
