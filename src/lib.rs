//! # onedrive-dl
//!
//! Minimal library for downloading a single file behind a OneDrive or
//! SharePoint share link using application credentials.
//!
//! The crate runs one linear pipeline per invocation:
//!
//! 1. Exchange client credentials for a Microsoft Graph bearer token.
//! 2. Resolve the share link to a direct download URL and a file name via
//!    the Graph `/shares` API.
//! 3. Stream the file to local storage under the resolved name.
//!
//! There is no persistent state, no token cache, and no retry logic; a
//! failure at any stage aborts the run with a single descriptive error.
//!
//! ## Quick Start
//!
//! ```no_run
//! use onedrive_dl::{Config, ShareDownloader};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         client_id: "app-id".to_string(),
//!         client_secret: "app-secret".to_string(),
//!         tenant_id: "tenant-id".to_string(),
//!         share_link: "https://1drv.ms/u/s!example".to_string(),
//!         ..Config::from_env()
//!     };
//!
//!     let outcome = ShareDownloader::new(config)?.run().await?;
//!     println!("file_name = {}", outcome.file_name);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Credential exchange against the identity provider
pub mod auth;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Streamed file download
pub mod fetch;
/// Pipeline orchestration
pub mod pipeline;
/// Share-link encoding and metadata lookup
pub mod share;

// Re-export commonly used types
pub use auth::AccessToken;
pub use config::{Config, Endpoints};
pub use error::{Error, Result};
pub use pipeline::{PipelineOutcome, ShareDownloader};
pub use share::FileMetadata;
