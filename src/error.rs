//! Error types for onedrive-dl
//!
//! Every pipeline stage wraps its underlying cause into a stage-tagged
//! variant with a human-readable prefix, so a single failure message is
//! enough to tell which stage broke and why.

use thiserror::Error;

/// Result type alias for onedrive-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for onedrive-dl
///
/// Each variant corresponds to one failure class of the download pipeline.
/// The `MissingInputs` and `MissingDownloadUrl` messages are stable strings
/// surfaced verbatim to the embedding host.
#[derive(Debug, Error)]
pub enum Error {
    /// One or more required inputs (client id, client secret, tenant id,
    /// share link) is empty. Raised before any network call is made.
    #[error("Missing required inputs.")]
    MissingInputs,

    /// The share resolved successfully but the metadata carried no
    /// download URL, so there is nothing to fetch.
    #[error("Failed to retrieve download URL.")]
    MissingDownloadUrl,

    /// Client-credentials token exchange failed
    #[error("token request failed: {0}")]
    Auth(String),

    /// Share-link metadata lookup failed
    #[error("share resolution failed: {0}")]
    Resolution(String),

    /// Streaming the file to local storage failed
    #[error("download failed: {0}")]
    Download(String),

    /// Network error outside any stage (e.g. HTTP client construction)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}
