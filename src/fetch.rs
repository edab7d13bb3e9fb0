//! Streamed file download to local storage

use crate::error::{Error, Result};
use futures::StreamExt;
use std::path::Path;
use tokio::io::AsyncWriteExt;

/// Stream a remote file to `dest`, overwriting any existing file
///
/// The destination is opened before the request is issued, so an
/// inaccessible path is reported without touching the network. The response
/// body is consumed chunk by chunk and never buffered whole in memory; the
/// file is flushed before the byte count is returned.
///
/// If an error occurs after the destination was created, the partial file
/// is removed on a best-effort basis.
///
/// # Errors
///
/// Returns [`Error::Download`] on file-open failure, transport failure,
/// a non-2xx response, a mid-stream read error, or a write/flush error.
pub async fn download_file(client: &reqwest::Client, url: &str, dest: &Path) -> Result<u64> {
    let file = tokio::fs::File::create(dest).await.map_err(|e| {
        Error::Download(format!("failed to create '{}': {}", dest.display(), e))
    })?;

    match stream_to_file(client, url, file).await {
        Ok(written) => Ok(written),
        Err(e) => {
            // Partial file on disk, remove it. Removal failure is logged,
            // the original error wins.
            if let Err(rm_err) = tokio::fs::remove_file(dest).await {
                tracing::warn!(
                    path = %dest.display(),
                    error = %rm_err,
                    "Failed to remove partial download"
                );
            }
            Err(e)
        }
    }
}

/// Issue the GET and pipe the body into the already-open file.
async fn stream_to_file(
    client: &reqwest::Client,
    url: &str,
    mut file: tokio::fs::File,
) -> Result<u64> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Download(format!("request to download URL failed: {}", e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Download(format!("HTTP {}", status)));
    }

    let mut written: u64 = 0;
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| Error::Download(format!("stream error: {}", e)))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::Download(format!("write error: {}", e)))?;
        written += chunk.len() as u64;
    }

    file.flush()
        .await
        .map_err(|e| Error::Download(format!("flush error: {}", e)))?;

    Ok(written)
}
