//! Share-link encoding and Microsoft Graph metadata lookup
//!
//! A shareable link is turned into a Graph sharing token by base64-encoding
//! it with the URL-safe alphabet, stripping padding, and prefixing `u!`.
//! The resulting segment addresses the shared item at
//! `/shares/{token}/driveItem`.

use crate::auth::AccessToken;
use crate::config::Config;
use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Metadata resolved for a shared file
///
/// `download_url` is a short-lived, pre-authenticated URL. It is optional
/// here because Graph omits the field for some item types (folders,
/// OneNote notebooks); presence is enforced by the pipeline, not by the
/// resolver.
#[derive(Clone, Debug)]
pub struct FileMetadata {
    /// Temporary direct download URL, if the item has one
    pub download_url: Option<String>,
    /// Display name of the item, used verbatim as the local file name
    pub file_name: String,
}

/// Wire format of the Graph driveItem response (only the fields we read)
#[derive(Debug, Deserialize)]
struct DriveItem {
    #[serde(rename = "@microsoft.graph.downloadUrl")]
    download_url: Option<String>,
    #[serde(default)]
    name: String,
}

/// Encode a share link as a Graph sharing-token path segment
///
/// URL-safe base64 (`+`→`-`, `/`→`_`) without padding, prefixed with `u!`.
/// The encoding is reversible; decoding the segment after stripping the
/// prefix yields the original link.
///
/// # Example
///
/// ```
/// use onedrive_dl::share::encode_share_link;
///
/// let segment = encode_share_link("https://1drv.ms/u/s!example");
/// assert!(segment.starts_with("u!"));
/// assert!(!segment.contains('='));
/// ```
pub fn encode_share_link(link: &str) -> String {
    format!("u!{}", URL_SAFE_NO_PAD.encode(link.as_bytes()))
}

/// Resolve a share link to file metadata via the Graph `/shares` API
///
/// Issues a bearer-authenticated GET for the shared driveItem and returns
/// its download URL and display name. A missing download URL is not an
/// error at this layer.
///
/// # Errors
///
/// Returns [`Error::Resolution`] on transport failure or a non-2xx
/// response (the message includes status and response body).
pub async fn resolve_share(
    client: &reqwest::Client,
    config: &Config,
    token: &AccessToken,
    link: &str,
) -> Result<FileMetadata> {
    let url = format!(
        "{}/shares/{}/driveItem",
        config.endpoints.graph_base,
        encode_share_link(link)
    );

    let response = client
        .get(&url)
        .header("Authorization", format!("Bearer {}", token.as_str()))
        .send()
        .await
        .map_err(|e| Error::Resolution(format!("request to Graph API failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Resolution(format!("HTTP {}: {}", status, body)));
    }

    let item: DriveItem = response
        .json()
        .await
        .map_err(|e| Error::Resolution(format!("invalid driveItem response: {}", e)))?;

    Ok(FileMetadata {
        download_url: item.download_url,
        file_name: item.name,
    })
}
