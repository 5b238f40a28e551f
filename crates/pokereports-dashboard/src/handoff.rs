use std::path::PathBuf;

use pokereports_client::download::fetch_to_file;
use pokereports_client::{BoxFuture, ClientError};
use pokereports_core::Report;

/// The platform's own download mechanism, reached only after the link has
/// passed its pre-flight check.
pub trait DownloadHandoff: Send + Sync {
    fn open<'a>(&'a self, report: &'a Report, url: &'a str)
    -> BoxFuture<'a, Result<(), ClientError>>;
}

/// Saves the file into a directory as `report-<id>.csv`.
#[derive(Debug, Clone)]
pub struct SaveToDirectory {
    http: reqwest::Client,
    dir: PathBuf,
}

impl SaveToDirectory {
    pub fn new(http: reqwest::Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            http,
            dir: dir.into(),
        }
    }

    pub fn destination(&self, report: &Report) -> PathBuf {
        self.dir.join(format!("report-{}.csv", report.display_id()))
    }
}

impl DownloadHandoff for SaveToDirectory {
    fn open<'a>(
        &'a self,
        report: &'a Report,
        url: &'a str,
    ) -> BoxFuture<'a, Result<(), ClientError>> {
        Box::pin(async move {
            let dest = self.destination(report);
            let bytes = fetch_to_file(&self.http, url, &dest).await?;
            tracing::info!(path = %dest.display(), bytes, "report downloaded");
            Ok(())
        })
    }
}
