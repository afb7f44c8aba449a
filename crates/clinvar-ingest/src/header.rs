//! VCF header inspection
//!
//! ClinVar stamps each weekly release with a `##fileDate=` meta line near the
//! top of the header. Only the header is read; scanning stops at the first
//! data line.

use clinvar_common::Result;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

const RELEASE_DATE_MARKER: &str = "##fileDate=";
const COMMENT_MARKER: char = '#';

/// Read the release date from a gzip (or bgzip) compressed VCF on local disk
///
/// Returns `Ok(None)` when the header ends, or the file ends, before a
/// `##fileDate=` line.
pub fn parse_release_date(local_vcf_path: &Path) -> Result<Option<String>> {
    let file = File::open(local_vcf_path)?;
    let reader = BufReader::new(MultiGzDecoder::new(file));
    let release_date = read_release_date(reader)?;

    debug!(
        path = %local_vcf_path.display(),
        release_date = ?release_date,
        "Scanned VCF header"
    );
    Ok(release_date)
}

/// Scan decompressed VCF text for the release date
pub fn read_release_date<R: BufRead>(reader: R) -> Result<Option<String>> {
    for line in reader.lines() {
        let line = line?;

        if line.starts_with(RELEASE_DATE_MARKER) {
            // Value is whatever follows the last '=' on the line
            let value = line.rsplit('=').next().unwrap_or_default();
            return Ok(Some(value.trim().to_string()));
        }

        if !line.starts_with(COMMENT_MARKER) {
            return Ok(None);
        }
    }

    Ok(None)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    const DATA_LINE: &str = "1\t925952\t1019397\tG\tA\t.\t.\tCLNREVSTAT=criteria_provided,_single_submitter\n";

    fn scan(text: &str) -> Option<String> {
        read_release_date(Cursor::new(text.as_bytes())).unwrap()
    }

    fn write_gzip(text: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text.as_bytes()).unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_release_date_found() {
        let text = format!("##fileformat=VCFv4.1\n##fileDate=2021-01-01\n#CHROM\tPOS\n{DATA_LINE}");
        assert_eq!(scan(&text), Some("2021-01-01".to_string()));
    }

    #[test]
    fn test_release_date_is_trimmed() {
        let text = format!("##fileDate=  2021-12-31  \n{DATA_LINE}");
        assert_eq!(scan(&text), Some("2021-12-31".to_string()));
    }

    #[test]
    fn test_release_date_takes_text_after_last_equals() {
        let text = format!("##fileDate=release=2021-01-01\n{DATA_LINE}");
        assert_eq!(scan(&text), Some("2021-01-01".to_string()));
    }

    #[test]
    fn test_empty_release_date_value() {
        assert_eq!(scan("##fileDate=\n"), Some(String::new()));
    }

    #[test]
    fn test_no_release_date_before_data() {
        let text = format!("##fileformat=VCFv4.1\n##source=ClinVar\n#CHROM\tPOS\n{DATA_LINE}");
        assert_eq!(scan(&text), None);
    }

    #[test]
    fn test_no_header_at_all() {
        assert_eq!(scan(DATA_LINE), None);
    }

    #[test]
    fn test_date_after_data_is_ignored() {
        let text = format!("##fileformat=VCFv4.1\n{DATA_LINE}##fileDate=2021-01-01\n");
        assert_eq!(scan(&text), None);
    }

    #[test]
    fn test_header_only_file() {
        assert_eq!(scan("##fileformat=VCFv4.1\n#CHROM\tPOS\n"), None);
        assert_eq!(scan(""), None);
    }

    #[test]
    fn test_crlf_line_endings() {
        let text = "##fileformat=VCFv4.1\r\n##fileDate=20240107\r\n";
        assert_eq!(scan(text), Some("20240107".to_string()));
    }

    #[test]
    fn test_parse_release_date_from_gzip_file() {
        let file = write_gzip(&format!(
            "##fileformat=VCFv4.1\n##fileDate=2024-01-07\n##source=ClinVar\n{DATA_LINE}"
        ));
        let release_date = parse_release_date(file.path()).unwrap();
        assert_eq!(release_date.as_deref(), Some("2024-01-07"));
    }

    #[test]
    fn test_parse_release_date_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(parse_release_date(&dir.path().join("absent.vcf.gz")).is_err());
    }

    #[test]
    fn test_parse_release_date_rejects_uncompressed_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"##fileDate=2024-01-07\n").unwrap();
        file.flush().unwrap();
        assert!(parse_release_date(file.path()).is_err());
    }
}
