//! Pipeline orchestration: authenticate, resolve, download
//!
//! The pipeline is strictly linear and short-circuiting. Each stage runs
//! once, there are no retries, and the first failure aborts the run with a
//! single stage-tagged error.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::{auth, fetch, share};

/// Outcome of a successful pipeline run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// Display name of the downloaded file, as reported by the Graph API.
    /// This is the host's `file_name` output value.
    pub file_name: String,
}

/// Downloads one shared OneDrive file per [`run`](ShareDownloader::run)
///
/// Holds the run configuration and a single HTTP client shared by all
/// three network stages.
///
/// # Example
///
/// ```no_run
/// use onedrive_dl::{Config, ShareDownloader};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = Config::from_env();
///     let downloader = ShareDownloader::new(config)?;
///     let outcome = downloader.run().await?;
///     println!("downloaded {}", outcome.file_name);
///     Ok(())
/// }
/// ```
pub struct ShareDownloader {
    config: Config,
    client: reqwest::Client,
}

impl ShareDownloader {
    /// Create a downloader from a configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] if the HTTP client cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { config, client })
    }

    /// Run the pipeline: validate inputs, acquire a token, resolve the
    /// share link, and stream the file to the download directory
    ///
    /// # Errors
    ///
    /// - [`Error::MissingInputs`] if any required input is empty; no
    ///   network call is made in that case.
    /// - [`Error::Auth`] if the token exchange fails or yields an empty
    ///   token.
    /// - [`Error::Resolution`] if the metadata lookup fails.
    /// - [`Error::MissingDownloadUrl`] if the metadata carries no download
    ///   URL; no download request is made in that case.
    /// - [`Error::Download`] if streaming the file to disk fails.
    pub async fn run(&self) -> Result<PipelineOutcome> {
        self.config.validate()?;

        let token = auth::acquire_token(&self.client, &self.config).await?;
        if token.is_empty() {
            return Err(Error::Auth("provider returned an empty token".to_string()));
        }
        tracing::info!("Access token acquired");

        let metadata =
            share::resolve_share(&self.client, &self.config, &token, &self.config.share_link)
                .await?;
        let download_url = match metadata.download_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => return Err(Error::MissingDownloadUrl),
        };
        tracing::info!(file_name = %metadata.file_name, "Share link resolved");

        let dest = self.config.download_dir.join(&metadata.file_name);
        let written = fetch::download_file(&self.client, download_url, &dest).await?;
        tracing::info!(
            file_name = %metadata.file_name,
            bytes = written,
            "Download complete"
        );

        Ok(PipelineOutcome {
            file_name: metadata.file_name,
        })
    }
}
