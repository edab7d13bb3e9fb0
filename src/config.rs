//! Configuration types for onedrive-dl

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Remote endpoint base URLs
///
/// Defaults point at the public Microsoft cloud. Overridable so embedders
/// (and the test suite) can target sovereign clouds or a mock server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Endpoints {
    /// Identity provider base URL (default: "https://login.microsoftonline.com")
    #[serde(default = "default_login_base")]
    pub login_base: String,

    /// Microsoft Graph base URL, including API version
    /// (default: "https://graph.microsoft.com/v1.0")
    #[serde(default = "default_graph_base")]
    pub graph_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login_base: default_login_base(),
            graph_base: default_graph_base(),
        }
    }
}

/// Configuration for a single pipeline run
///
/// The four credential/link fields are the required host inputs and have no
/// defaults; everything else works out of the box.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Application (client) ID of the Entra ID app registration
    pub client_id: String,

    /// Client secret of the app registration
    pub client_secret: String,

    /// Directory (tenant) ID the app registration lives in
    pub tenant_id: String,

    /// Shareable OneDrive/SharePoint link to the target file
    pub share_link: String,

    /// Directory the downloaded file is written to (default: ".")
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// Remote endpoint base URLs
    #[serde(default)]
    pub endpoints: Endpoints,

    /// Per-request timeout (None = no timeout; a hung request blocks the run)
    #[serde(default)]
    pub request_timeout: Option<Duration>,
}

impl Config {
    /// Build a configuration from environment variables
    ///
    /// Reads `AZURE_CLIENT_ID`, `AZURE_CLIENT_SECRET`, `AZURE_TENANT_ID` and
    /// `ONEDRIVE_LINK`. Unset variables become empty strings so that
    /// [`Config::validate`] reports them the same way as blank host inputs.
    pub fn from_env() -> Self {
        let var = |name: &str| std::env::var(name).unwrap_or_default();
        Self {
            client_id: var("AZURE_CLIENT_ID"),
            client_secret: var("AZURE_CLIENT_SECRET"),
            tenant_id: var("AZURE_TENANT_ID"),
            share_link: var("ONEDRIVE_LINK"),
            download_dir: default_download_dir(),
            endpoints: Endpoints::default(),
            request_timeout: None,
        }
    }

    /// Check that all required inputs are present
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInputs`] if any of the client id, client
    /// secret, tenant id, or share link is empty. The pipeline calls this
    /// before issuing any network request.
    pub fn validate(&self) -> Result<()> {
        let required = [
            &self.client_id,
            &self.client_secret,
            &self.tenant_id,
            &self.share_link,
        ];
        if required.iter().any(|v| v.is_empty()) {
            return Err(Error::MissingInputs);
        }
        Ok(())
    }

    /// URL of the tenant's OAuth2 token endpoint
    pub(crate) fn token_url(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.endpoints.login_base, self.tenant_id
        )
    }
}

fn default_login_base() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_graph_base() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}

fn default_download_dir() -> PathBuf {
    PathBuf::from(".")
}
