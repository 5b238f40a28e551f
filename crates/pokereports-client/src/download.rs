//! Download link checks and the file fetch behind a hand-off.
//!
//! Completed reports carry a pre-signed Azure Blob Storage URL. Once the
//! signature expires the storage account answers with an XML error
//! document such as:
//!
//! ```text
//! <?xml version="1.0" encoding="utf-8"?>
//! <Error><Code>AuthenticationFailed</Code><Message>Server failed to
//! authenticate the request...</Message></Error>
//! ```
//!
//! There is no structured contract for this, so detection is a substring
//! match on the two markers below. If the provider changes its error
//! format the classifier stops firing and the user gets a generic error.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use reqwest::Client;
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

use crate::directory::BoxFuture;
use crate::error::{ClientError, ProbeError};

/// Root element of a storage error document.
pub const STORAGE_ERROR_MARKER: &str = "<Error>";

/// Error code the storage account uses for a rejected signature.
pub const AUTH_FAILED_MARKER: &str = "AuthenticationFailed";

/// True iff `body` looks like a storage authentication error document.
pub fn is_storage_auth_failure(body: &str) -> bool {
    body.contains(STORAGE_ERROR_MARKER) && body.contains(AUTH_FAILED_MARKER)
}

/// Pre-flight check of a download link.
pub trait LinkProbe: Send + Sync {
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), ProbeError>>;
}

#[derive(Debug, Clone, Default)]
pub struct HttpLinkProbe {
    http: Client,
}

impl HttpLinkProbe {
    pub fn new(http: Client) -> Self {
        Self { http }
    }
}

impl LinkProbe for HttpLinkProbe {
    fn probe<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<(), ProbeError>> {
        Box::pin(probe_link(&self.http, url))
    }
}

/// GET `url` and classify the outcome. The body of a success response is
/// not read.
pub async fn probe_link(http: &Client, url: &str) -> Result<(), ProbeError> {
    let resp = match http.get(url).send().await {
        Ok(resp) => resp,
        Err(e) if e.is_connect() || e.is_timeout() || e.is_request() => {
            warn!(error = %e, "download link unreachable");
            return Err(ProbeError::Unreachable(e.to_string()));
        }
        Err(e) => return Err(ProbeError::Other(e.to_string())),
    };

    let status = resp.status();
    if status.is_success() {
        debug!(status = status.as_u16(), "download link ok");
        return Ok(());
    }

    let body = resp.text().await.unwrap_or_default();
    if is_storage_auth_failure(&body) {
        warn!(status = status.as_u16(), "storage rejected download link signature");
        return Err(ProbeError::StorageAuth);
    }

    warn!(status = status.as_u16(), "download link check failed");
    Err(ProbeError::Http {
        status: status.as_u16(),
    })
}

/// Stream `url` into `dest`, returning the number of bytes written.
///
/// The body is written to a `.part` file next to `dest` and renamed into
/// place once complete. A failed transfer leaves nothing at `dest`.
pub async fn fetch_to_file(http: &Client, url: &str, dest: &Path) -> Result<u64, ClientError> {
    let resp = http
        .get(url)
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Remote {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            detail: None,
        });
    }

    let part = partial_path(dest);
    let written = match stream_body(resp, &part).await {
        Ok(written) => written,
        Err(e) => {
            if let Err(cleanup) = tokio::fs::remove_file(&part).await {
                debug!(path = %part.display(), error = %cleanup, "no partial download to remove");
            }
            warn!(url, error = %e, "download interrupted");
            return Err(e);
        }
    };
    tokio::fs::rename(&part, dest).await?;

    debug!(path = %dest.display(), bytes = written, "download saved");
    Ok(written)
}

fn partial_path(dest: &Path) -> PathBuf {
    let mut name = dest.file_name().map(OsString::from).unwrap_or_default();
    name.push(".part");
    dest.with_file_name(name)
}

async fn stream_body(mut resp: reqwest::Response, path: &Path) -> Result<u64, ClientError> {
    let mut file = tokio::fs::File::create(path).await?;
    let mut written = 0u64;
    while let Some(chunk) = resp
        .chunk()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?
    {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}
