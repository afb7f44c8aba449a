//! Moving the ClinVar VCF from NCBI to the distributed filesystem
//!
//! [`Transfer`] is the seam between the fetch pipeline and real infrastructure.
//! [`SystemTransfer`] talks to the network and to the `hdfs` client; tests
//! substitute their own implementation.
//!
//! Neither step retries. A failed download or copy is returned to the caller
//! as-is and whatever was written to the staging path is left in place.

use clinvar_common::{ClinvarError, Result};
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io;
use std::path::Path;
use std::process::Command;
use suppaftp::types::FileType;
use suppaftp::{FtpStream, Mode};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::{DownloadBackend, IngestConfig};

/// The two side-effecting steps of a ClinVar fetch
pub trait Transfer {
    /// Download `url` to `local_path`, replacing any existing file
    fn fetch_remote(&self, url: &str, local_path: &Path) -> Result<()>;

    /// Copy a local file into the distributed filesystem, replacing any existing file
    fn copy_to_dfs(&self, local_path: &Path, dfs_path: &str) -> Result<()>;
}

impl<T: Transfer + ?Sized> Transfer for &T {
    fn fetch_remote(&self, url: &str, local_path: &Path) -> Result<()> {
        (**self).fetch_remote(url, local_path)
    }

    fn copy_to_dfs(&self, local_path: &Path, dfs_path: &str) -> Result<()> {
        (**self).copy_to_dfs(local_path, dfs_path)
    }
}

/// Transfer backed by `wget` or a native FTP session, and the `hdfs` CLI
#[derive(Debug, Clone)]
pub struct SystemTransfer {
    backend: DownloadBackend,
    hdfs_program: String,
    ftp_username: String,
    ftp_password: String,
}

impl SystemTransfer {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            backend: config.download_backend,
            hdfs_program: config.hdfs_program.clone(),
            ftp_username: config.ftp_username.clone(),
            ftp_password: config.ftp_password.clone(),
        }
    }

    fn wget(&self, url: &str, local_path: &Path) -> Result<()> {
        run_command("wget", &wget_args(url, local_path))
    }

    fn ftp_download(&self, url: &str, local_path: &Path) -> Result<()> {
        let location = FtpLocation::parse(url)?;

        debug!("Connecting to FTP server: {}", location.address());
        let mut ftp_stream = FtpStream::connect(location.address()).map_err(ftp_error)?;

        // Extended passive mode works through NAT
        ftp_stream.set_mode(Mode::ExtendedPassive);

        ftp_stream
            .login(&self.ftp_username, &self.ftp_password)
            .map_err(ftp_error)?;
        ftp_stream
            .transfer_type(FileType::Binary)
            .map_err(ftp_error)?;

        let mut data_stream = ftp_stream
            .retr_as_stream(&location.path)
            .map_err(ftp_error)?;
        let mut file = File::create(local_path)?;
        let bytes = io::copy(&mut data_stream, &mut file)?;
        ftp_stream
            .finalize_retr_stream(data_stream)
            .map_err(ftp_error)?;

        debug!("Downloaded {} bytes from {}", bytes, location.path);

        if let Err(e) = ftp_stream.quit() {
            warn!("Failed to quit FTP session gracefully: {}", e);
        }
        Ok(())
    }
}

impl Transfer for SystemTransfer {
    fn fetch_remote(&self, url: &str, local_path: &Path) -> Result<()> {
        info!(
            %url,
            path = %local_path.display(),
            backend = self.backend.as_str(),
            "Downloading remote file"
        );
        match self.backend {
            DownloadBackend::Wget => self.wget(url, local_path),
            DownloadBackend::Ftp => self.ftp_download(url, local_path),
        }
    }

    fn copy_to_dfs(&self, local_path: &Path, dfs_path: &str) -> Result<()> {
        info!(local = %local_path.display(), dfs = dfs_path, "Copying file to HDFS");
        run_command(&self.hdfs_program, &dfs_copy_args(local_path, dfs_path))
    }
}

/// `wget <url> -O <local path>`
pub fn wget_args(url: &str, local_path: &Path) -> Vec<OsString> {
    vec![url.into(), "-O".into(), local_path.into()]
}

/// `dfs -cp -f file://<local path> <dfs path>`
pub fn dfs_copy_args(local_path: &Path, dfs_path: &str) -> Vec<OsString> {
    let mut source = OsString::from("file://");
    source.push(local_path);
    vec!["dfs".into(), "-cp".into(), "-f".into(), source, dfs_path.into()]
}

/// Host, port and path of an `ftp://` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FtpLocation {
    pub host: String,
    pub port: u16,
    pub path: String,
}

impl FtpLocation {
    pub fn parse(url: &str) -> Result<Self> {
        let parsed =
            Url::parse(url).map_err(|e| ClinvarError::InvalidUrl(format!("{}: {}", url, e)))?;

        if parsed.scheme() != "ftp" {
            return Err(ClinvarError::InvalidUrl(format!(
                "{}: expected an ftp:// URL",
                url
            )));
        }

        let host = parsed
            .host_str()
            .ok_or_else(|| ClinvarError::InvalidUrl(format!("{}: missing host", url)))?;

        // FTP servers expect the literal path, not the URL-escaped form
        let path = urlencoding::decode(parsed.path())
            .map_err(|e| ClinvarError::InvalidUrl(format!("{}: {}", url, e)))?;

        Ok(Self {
            host: host.to_string(),
            port: parsed.port_or_known_default().unwrap_or(21),
            path: path.into_owned(),
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Run an external program to completion, failing on a non-zero exit
pub(crate) fn run_command<S>(program: &str, args: &[S]) -> Result<()>
where
    S: AsRef<OsStr> + std::fmt::Debug,
{
    debug!(program, ?args, "Running command");

    let status = Command::new(program).args(args).status()?;
    if !status.success() {
        return Err(ClinvarError::command_failed(program, status));
    }
    Ok(())
}

fn ftp_error(e: suppaftp::FtpError) -> ClinvarError {
    ClinvarError::Ftp(e.to_string())
}
