//! ClinVar Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging setup and error handling for the ClinVar ingest workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`ClinvarError`] and the [`Result`] alias
//! - **Logging**: tracing subscriber setup driven by [`logging::LogConfig`]
//! - **Types**: domain types shared between crates, such as [`types::GenomeVersion`]
//!
//! # Example
//!
//! ```no_run
//! use clinvar_common::types::GenomeVersion;
//! use clinvar_common::Result;
//!
//! fn reference(version: &str) -> Result<&'static str> {
//!     let version: GenomeVersion = version.parse()?;
//!     Ok(version.reference_genome())
//! }
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{ClinvarError, Result};
