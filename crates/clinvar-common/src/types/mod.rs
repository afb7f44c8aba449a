//! Common types used across the ClinVar workspace

use crate::error::{ClinvarError, Result};
use serde::{Deserialize, Serialize};

/// Reference genome build a ClinVar release is published against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenomeVersion {
    #[serde(rename = "37")]
    Grch37,
    #[serde(rename = "38")]
    Grch38,
}

impl GenomeVersion {
    /// All supported builds
    pub const ALL: [GenomeVersion; 2] = [GenomeVersion::Grch37, GenomeVersion::Grch38];

    /// Short form used in URL and path templates ("37" or "38")
    pub fn as_str(&self) -> &'static str {
        match self {
            GenomeVersion::Grch37 => "37",
            GenomeVersion::Grch38 => "38",
        }
    }

    /// Reference genome name as understood by the variant engine
    pub fn reference_genome(&self) -> &'static str {
        match self {
            GenomeVersion::Grch37 => "GRCh37",
            GenomeVersion::Grch38 => "GRCh38",
        }
    }
}

impl std::str::FromStr for GenomeVersion {
    type Err = ClinvarError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "37" => Ok(GenomeVersion::Grch37),
            "38" => Ok(GenomeVersion::Grch38),
            other => Err(ClinvarError::InvalidGenomeVersion(other.to_string())),
        }
    }
}

impl std::fmt::Display for GenomeVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_genome_version_from_str() {
        assert_eq!("37".parse::<GenomeVersion>().unwrap(), GenomeVersion::Grch37);
        assert_eq!("38".parse::<GenomeVersion>().unwrap(), GenomeVersion::Grch38);
    }

    #[test]
    fn test_genome_version_rejects_other_values() {
        for bad in ["36", "39", "", "GRCh37", " 37", "hg19"] {
            let err = bad.parse::<GenomeVersion>().unwrap_err();
            assert!(err.is_invalid_argument(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn test_genome_version_display_and_reference() {
        assert_eq!(GenomeVersion::Grch37.to_string(), "37");
        assert_eq!(GenomeVersion::Grch38.reference_genome(), "GRCh38");
    }

    #[test]
    fn test_genome_version_serde_uses_short_form() {
        let json = serde_json::to_string(&GenomeVersion::Grch38).unwrap();
        assert_eq!(json, "\"38\"");
        let parsed: GenomeVersion = serde_json::from_str("\"37\"").unwrap();
        assert_eq!(parsed, GenomeVersion::Grch37);
    }
}
