//! Hand-off to the external variant table engine
//!
//! The engine owns VCF parsing, partitioning and table storage. This module
//! only describes what is asked of it ([`ImportOptions`]) and what comes back
//! ([`VariantTable`]), a handle plus the global annotations set on it.

use chrono::{DateTime, Utc};
use clinvar_common::types::GenomeVersion;
use clinvar_common::{ClinvarError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use crate::transfer::run_command;

/// Options for a single VCF import
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
    pub genome_version: GenomeVersion,

    /// Drop per-sample genotype columns
    pub drop_samples: bool,

    /// Parallelism hint, not a correctness constraint
    pub min_partitions: u32,

    /// Skip records whose locus is invalid for the reference genome instead of failing
    pub skip_invalid_loci: bool,

    /// Where the engine should write the table, if it persists one
    pub output_path: Option<String>,
}

impl ImportOptions {
    pub fn new(genome_version: GenomeVersion) -> Self {
        Self {
            genome_version,
            drop_samples: false,
            min_partitions: 1,
            skip_invalid_loci: false,
            output_path: None,
        }
    }

    pub fn drop_samples(mut self, drop: bool) -> Self {
        self.drop_samples = drop;
        self
    }

    pub fn min_partitions(mut self, partitions: u32) -> Self {
        self.min_partitions = partitions;
        self
    }

    pub fn skip_invalid_loci(mut self, skip: bool) -> Self {
        self.skip_invalid_loci = skip;
        self
    }

    pub fn output_path(mut self, path: impl Into<String>) -> Self {
        self.output_path = Some(path.into());
        self
    }
}

/// Handle to a table produced by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantTable {
    /// Staged VCF the table was imported from
    pub source_path: String,

    pub reference_genome: String,

    pub options: ImportOptions,

    pub imported_at: DateTime<Utc>,

    /// Table-level annotations, keyed by name
    pub globals: BTreeMap<String, serde_json::Value>,
}

impl VariantTable {
    pub fn new(source_path: impl Into<String>, options: ImportOptions) -> Self {
        Self {
            source_path: source_path.into(),
            reference_genome: options.genome_version.reference_genome().to_string(),
            options,
            imported_at: Utc::now(),
            globals: BTreeMap::new(),
        }
    }

    /// Set a global annotation, replacing any previous value under the same name
    pub fn annotate_globals(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.globals.insert(name.into(), value);
        self
    }

    pub fn global(&self, name: &str) -> Option<&serde_json::Value> {
        self.globals.get(name)
    }

    pub fn location(&self) -> Option<&str> {
        self.options.output_path.as_deref()
    }
}

/// External engine that turns a VCF into a [`VariantTable`]
pub trait VariantEngine {
    fn import_vcf(&self, path: &str, options: &ImportOptions) -> Result<VariantTable>;
}

impl<E: VariantEngine + ?Sized> VariantEngine for &E {
    fn import_vcf(&self, path: &str, options: &ImportOptions) -> Result<VariantTable> {
        (**self).import_vcf(path, options)
    }
}

/// Engine driven through an importer executable
///
/// Invoked as:
///
/// ```text
/// <program> <path> --reference-genome GRCh38 --min-partitions 2000 \
///     [--drop-samples] [--skip-invalid-loci] [--output <table path>]
/// ```
#[derive(Debug, Clone)]
pub struct CommandEngine {
    program: String,
}

impl CommandEngine {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the importer for one import
    pub fn arguments(path: &str, options: &ImportOptions) -> Vec<String> {
        let mut args = vec![
            path.to_string(),
            "--reference-genome".to_string(),
            options.genome_version.reference_genome().to_string(),
            "--min-partitions".to_string(),
            options.min_partitions.to_string(),
        ];
        if options.drop_samples {
            args.push("--drop-samples".to_string());
        }
        if options.skip_invalid_loci {
            args.push("--skip-invalid-loci".to_string());
        }
        if let Some(ref output) = options.output_path {
            args.push("--output".to_string());
            args.push(output.clone());
        }
        args
    }
}

impl VariantEngine for CommandEngine {
    fn import_vcf(&self, path: &str, options: &ImportOptions) -> Result<VariantTable> {
        if options.min_partitions == 0 {
            return Err(ClinvarError::engine("min_partitions must be at least 1"));
        }

        info!(
            program = %self.program,
            path,
            reference_genome = options.genome_version.reference_genome(),
            min_partitions = options.min_partitions,
            "Importing VCF"
        );
        run_command(&self.program, &Self::arguments(path, options))?;

        Ok(VariantTable::new(path, options.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn clinvar_options() -> ImportOptions {
        ImportOptions::new(GenomeVersion::Grch38)
            .drop_samples(true)
            .min_partitions(2000)
            .skip_invalid_loci(true)
    }

    #[test]
    fn test_command_arguments() {
        let options = clinvar_options().output_path("gs://bucket/clinvar.GRCh38.ht");
        let args = CommandEngine::arguments("/clinvar.vcf.gz", &options);
        assert_eq!(
            args,
            vec![
                "/clinvar.vcf.gz",
                "--reference-genome",
                "GRCh38",
                "--min-partitions",
                "2000",
                "--drop-samples",
                "--skip-invalid-loci",
                "--output",
                "gs://bucket/clinvar.GRCh38.ht",
            ]
        );
    }

    #[test]
    fn test_command_arguments_minimal() {
        let options = ImportOptions::new(GenomeVersion::Grch37);
        let args = CommandEngine::arguments("/clinvar.vcf.gz", &options);
        assert_eq!(
            args,
            vec!["/clinvar.vcf.gz", "--reference-genome", "GRCh37", "--min-partitions", "1"]
        );
    }

    #[test]
    fn test_annotate_globals_replaces_value() {
        let table = VariantTable::new("/clinvar.vcf.gz", clinvar_options())
            .annotate_globals("version", json!(null))
            .annotate_globals("version", json!("2024-01-07"));

        assert_eq!(table.global("version"), Some(&json!("2024-01-07")));
        assert_eq!(table.globals.len(), 1);
        assert_eq!(table.reference_genome, "GRCh38");
        assert_eq!(table.location(), None);
    }

    #[test]
    fn test_zero_partitions_rejected_before_running() {
        let engine = CommandEngine::new("clinvar-no-such-importer");
        let err = engine
            .import_vcf("/clinvar.vcf.gz", &clinvar_options().min_partitions(0))
            .unwrap_err();
        assert!(matches!(err, ClinvarError::Engine(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_import_propagates_importer_failure() {
        let engine = CommandEngine::new("false");
        let err = engine
            .import_vcf("/clinvar.vcf.gz", &clinvar_options())
            .unwrap_err();
        assert!(matches!(err, ClinvarError::CommandFailed { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_import_returns_handle() {
        let engine = CommandEngine::new("true");
        let table = engine
            .import_vcf("/clinvar.vcf.gz", &clinvar_options())
            .unwrap();
        assert_eq!(table.source_path, "/clinvar.vcf.gz");
        assert!(table.options.drop_samples);
        assert!(table.globals.is_empty());
    }
}
